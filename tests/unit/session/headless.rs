use super::*;
use crate::encode::sink::InMemorySink;

fn small() -> HeadlessOpts {
    HeadlessOpts {
        width: 32.0,
        height: 24.0,
        device_pixel_ratio: 1.0,
        fps: 30,
    }
}

fn seeded() -> BackdropConfig {
    BackdropConfig {
        seed: Some(5),
        particle_count: 4,
        noise: crate::scene::noise::NoiseParams {
            size: 16,
            ..Default::default()
        },
        ..BackdropConfig::default()
    }
}

#[test]
fn opts_are_validated() {
    assert!(HeadlessOpts { fps: 0, ..small() }.validate().is_err());
    assert!(HeadlessOpts { width: 0.5, ..small() }.validate().is_err());
    assert!(small().validate().is_ok());
    assert!((small().frame_interval_ms() - 33.333333).abs() < 1e-3);
}

#[test]
fn pointer_paths() {
    assert_eq!(PointerPath::Still.position_at(3, 1.0), None);
    assert_eq!(PointerPath::Points(vec![]).position_at(3, 1.0), None);
    let pts = PointerPath::Points(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
    assert_eq!(pts.position_at(3, 0.0), Some(Point::new(2.0, 2.0)));

    let orbit = PointerPath::Orbit {
        center: Point::new(10.0, 10.0),
        radius: 5.0,
        period_s: 4.0,
    };
    let p = orbit.position_at(0, 1.0).unwrap();
    assert!((p.x - 10.0).abs() < 1e-9);
    assert!((p.y - 15.0).abs() < 1e-9);
}

#[test]
fn run_pushes_every_frame_at_buffer_size() {
    let mut run = HeadlessRun::new(seeded(), small()).unwrap();
    let mut sink = InMemorySink::new();
    let stats = run.run(5, &PointerPath::Still, &mut sink).unwrap();

    assert_eq!(stats.frames, 5);
    assert!((stats.last_t_ms - 4.0 * 1000.0 / 30.0).abs() < 1e-9);
    assert_eq!(sink.frames().len(), 5);
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.fps), (32, 24, 30));
    for (_, f) in sink.frames() {
        assert_eq!((f.width, f.height), (32, 24));
        // Background, glow and vignette are all opaque over the full surface.
        assert!(f.data.chunks_exact(4).all(|px| px[3] == 255));
    }
    assert!(sink.ended());
    // Six frames (forced + five) of five to nine fills each.
    assert!(stats.fills >= 6 * 5);
}

#[test]
fn same_seed_renders_identical_frames() {
    let a = HeadlessRun::new(seeded(), small())
        .unwrap()
        .render_until(200.0, &PointerPath::Still)
        .unwrap();
    let b = HeadlessRun::new(seeded(), small())
        .unwrap()
        .render_until(200.0, &PointerPath::Still)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn trace_lists_layers_of_one_frame() {
    let cmds = trace_frame(seeded(), small(), 16.0, Some(Point::new(1.0, 2.0))).unwrap();
    let fills = cmds
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillRect { .. } | DrawCommand::FillCircle { .. }))
        .count();
    // background, glow, grain, four particles, vignette
    assert_eq!(fills, 8);
}

#[test]
fn oversized_buffers_are_rejected() {
    let wide = HeadlessOpts {
        width: 40_000.0,
        device_pixel_ratio: 2.0,
        ..small()
    };
    assert!(matches!(wide.validate(), Err(GlowfieldError::Validation(_))));
    assert!(HeadlessRun::new(seeded(), wide).is_err());
    assert!(
        HeadlessOpts {
            width: 32_767.0,
            device_pixel_ratio: 2.0,
            ..small()
        }
        .validate()
        .is_ok()
    );
}

#[test]
fn rejected_frame_callbacks_are_errors() {
    use crate::host::schedule::FrameScheduler;

    let mut idle = Backdrop::new(
        seeded(),
        RecordingSurface::new(),
        ManualScheduler::new(),
        StaticHost::new(Size::new(32.0, 24.0), 1.0),
    )
    .unwrap();
    assert!(matches!(deliver_frame(&mut idle, 16.0), Err(GlowfieldError::Render(_))));

    // A due callback for a backdrop that never mounted is refused.
    idle.scheduler_mut().request_frame();
    assert!(matches!(deliver_frame(&mut idle, 16.0), Err(GlowfieldError::Render(_))));
    assert_eq!(idle.frames_painted(), 0);
}
