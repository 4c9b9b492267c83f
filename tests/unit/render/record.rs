use super::*;
use crate::foundation::core::{Rgba, Vec2};

#[test]
fn fills_capture_the_current_state() {
    let mut s = RecordingSurface::new();
    assert!(!s.is_ready());
    s.resize(20, 10);
    assert!(s.is_ready());

    s.save();
    s.translate(Vec2::new(3.0, 4.0));
    s.set_global_alpha(0.5);
    s.set_blend_mode(BlendMode::Overlay);
    s.fill_circle(Point::new(1.0, 1.0), 2.0, &FillStyle::Solid { color: Rgba::WHITE });
    s.restore();
    s.fill_rect(
        Rect::new(0.0, 0.0, 20.0, 10.0),
        &FillStyle::Solid { color: Rgba::WHITE },
    );

    let cmds = s.take_commands();
    assert_eq!(cmds.len(), 3);
    match &cmds[1] {
        DrawCommand::FillCircle {
            transform,
            alpha,
            blend,
            ..
        } => {
            assert_eq!(*transform, [1.0, 0.0, 0.0, 1.0, 3.0, 4.0]);
            assert_eq!(*alpha, 0.5);
            assert_eq!(*blend, BlendMode::Overlay);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(command_transform(&cmds[2]), Some(Affine::IDENTITY));
    assert_eq!(command_transform(&cmds[0]), None);
    assert!(s.commands().is_empty());
}

#[test]
fn pattern_handles_are_sequential() {
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1);
    let tex = NoiseTexture::build(&crate::scene::noise::NoiseParams::default(), &mut rng).unwrap();
    let mut s = RecordingSurface::new();
    assert_eq!(s.create_pattern(&tex), Pattern(0));
    assert_eq!(s.create_pattern(&tex), Pattern(1));
    assert_eq!(
        s.commands()[0],
        DrawCommand::CreatePattern {
            pattern: Pattern(0),
            size: 128
        }
    );
}

#[test]
fn commands_serialize_with_an_op_tag() {
    let mut s = RecordingSurface::new();
    s.resize(2, 2);
    let v = serde_json::to_value(s.commands()).unwrap();
    assert_eq!(v[0]["op"], "resize");
    assert_eq!(v[0]["width"], 2);
}
