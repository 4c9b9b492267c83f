use super::*;
use crate::foundation::core::Size;
use crate::host::element::StaticHost;
use crate::host::schedule::ManualScheduler;
use crate::render::record::{DrawCommand, RecordingSurface};
use crate::scene::surface::HostMeasurement;

type TestBackdrop = Backdrop<RecordingSurface, ManualScheduler, StaticHost>;

fn backdrop(config: BackdropConfig) -> TestBackdrop {
    Backdrop::new(
        config,
        RecordingSurface::new(),
        ManualScheduler::new(),
        StaticHost::new(Size::new(800.0, 600.0), 1.0),
    )
    .unwrap()
}

fn seeded() -> BackdropConfig {
    BackdropConfig {
        seed: Some(11),
        ..BackdropConfig::default()
    }
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-6
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = BackdropConfig {
        smoothing: -1.0,
        ..BackdropConfig::default()
    };
    assert!(
        Backdrop::new(
            cfg,
            RecordingSurface::new(),
            ManualScheduler::new(),
            StaticHost::new(Size::new(1.0, 1.0), 1.0),
        )
        .is_err()
    );
}

#[test]
fn mount_measures_builds_noise_and_schedules_one_frame() {
    let mut b = backdrop(seeded());
    assert_eq!(b.state(), LoopState::Idle);
    b.mount();

    assert_eq!(b.state(), LoopState::Running);
    assert!(b.noise_built());
    assert_eq!(b.noise().map(|n| n.size()), Some(128));
    assert!(b.host().is_observing());
    assert_eq!(b.scheduler().outstanding().len(), 1);
    assert_eq!(b.surface().size(), Some((800, 600)));
    assert_eq!(b.frames_painted(), 1);
    assert!(close(b.focal(), Point::new(440.0, 210.0)));

    // Second mount is a no-op.
    b.mount();
    assert_eq!(b.scheduler().requested(), 1);
}

#[test]
fn pointer_moves_focal_by_the_smoothing_factor() {
    let mut b = backdrop(seeded());
    b.mount();
    let h = b.scheduler_mut().take_due().unwrap();
    assert!(b.on_animation_frame(h, 16.0));
    assert!(close(b.focal(), Point::new(440.0, 210.0)));

    b.on_pointer(&PointerEvent::Move {
        client: Point::new(100.0, 100.0),
    });
    let h = b.scheduler_mut().take_due().unwrap();
    assert!(b.on_animation_frame(h, 32.0));
    assert!(close(b.focal(), Point::new(409.4, 200.1)));
}

#[test]
fn pointer_positions_are_relative_to_the_surface_origin() {
    let mut b = backdrop(seeded());
    b.host_mut().set_measurement(HostMeasurement {
        element: crate::foundation::core::Rect::new(50.0, 20.0, 850.0, 620.0),
        parent: None,
        viewport: Size::new(1280.0, 720.0),
        device_pixel_ratio: 1.0,
    });
    b.mount();
    b.on_pointer(&PointerEvent::Touch {
        touches: vec![Point::new(60.0, 30.0), Point::new(0.0, 0.0)],
    });
    assert!(close(b.pointer_target(), Point::new(10.0, 10.0)));

    // Empty touch lists leave the target alone.
    b.on_pointer(&PointerEvent::Touch { touches: vec![] });
    assert!(close(b.pointer_target(), Point::new(10.0, 10.0)));
}

#[test]
fn stale_handles_are_ignored() {
    let mut b = backdrop(seeded());
    b.mount();
    let painted = b.frames_painted();
    assert!(!b.on_animation_frame(FrameHandle(999), 16.0));
    assert_eq!(b.frames_painted(), painted);
}

#[test]
fn hide_cancels_and_show_starts_one_new_chain() {
    let mut b = backdrop(seeded());
    b.mount();
    let first = b.pending_frame().unwrap();

    b.on_visibility(Visibility::Hidden);
    b.on_visibility(Visibility::Hidden);
    assert_eq!(b.state(), LoopState::Paused);
    assert_eq!(b.scheduler().cancelled(), 1);
    assert!(b.scheduler().outstanding().is_empty());
    assert!(!b.on_animation_frame(first, 16.0));

    b.on_visibility(Visibility::Visible);
    b.on_visibility(Visibility::Visible);
    assert_eq!(b.state(), LoopState::Running);
    assert_eq!(b.scheduler().outstanding().len(), 1);
    assert_eq!(b.scheduler().requested(), 2);
    assert_eq!(b.grain().last_timestamp(), None);
}

#[test]
fn resize_regenerates_particles_and_reseeds_focal() {
    let cfg = BackdropConfig {
        particle_count: 25,
        ..seeded()
    };
    let mut b = backdrop(cfg);
    b.mount();
    assert_eq!(b.particles().len(), 25);
    b.on_pointer(&PointerEvent::Move {
        client: Point::new(10.0, 10.0),
    });

    b.host_mut()
        .set_measurement(HostMeasurement::fixed(Size::new(300.0, 200.0), 3.0));
    b.on_resize();
    let m = *b.metrics().unwrap();
    assert_eq!((m.buffer_width, m.buffer_height), (600, 400));
    assert_eq!(b.surface().size(), Some((600, 400)));
    assert!(close(b.pointer_target(), Point::new(165.0, 70.0)));
    assert!(close(b.focal(), Point::new(165.0, 70.0)));
    assert_eq!(b.particles().len(), 25);
    for p in b.particles().as_slice() {
        assert!((0.0..=300.0).contains(&p.pos.x));
        assert!((0.0..=200.0).contains(&p.pos.y));
    }
    // The texture is built once per lifetime.
    let patterns = b
        .surface()
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::CreatePattern { .. }))
        .count();
    assert_eq!(patterns, 1);
}

#[test]
fn resize_paint_reuses_the_last_timestamp() {
    let mut b = backdrop(seeded());
    b.mount();
    let h = b.scheduler_mut().take_due().unwrap();
    b.on_animation_frame(h, 5000.0);
    let offset = b.grain().offset();

    b.on_resize();
    assert_eq!(b.grain().last_timestamp(), Some(5000.0));
    assert_eq!(b.grain().offset(), offset);
}

#[test]
fn unmount_is_terminal() {
    let mut b = backdrop(seeded());
    b.mount();
    let h = b.pending_frame().unwrap();
    b.unmount();
    assert_eq!(b.state(), LoopState::Destroyed);
    assert_eq!(b.scheduler().cancelled(), 1);
    assert_eq!(b.host().disconnects(), 1);

    let painted = b.frames_painted();
    assert!(!b.on_animation_frame(h, 16.0));
    b.on_visibility(Visibility::Visible);
    b.on_resize();
    b.paint(100.0);
    b.unmount();
    assert_eq!(b.frames_painted(), painted);
    assert_eq!(b.state(), LoopState::Destroyed);
    assert_eq!(b.host().disconnects(), 1);
}

#[test]
fn paint_before_measurement_is_skipped() {
    let mut b = backdrop(seeded());
    b.paint(16.0);
    assert_eq!(b.frames_painted(), 0);
    assert!(b.surface().commands().is_empty());
}

#[test]
fn first_frame_after_mount_integrates_no_drift() {
    let mut b = backdrop(seeded());
    b.mount();
    assert_eq!(b.grain().last_timestamp(), None);

    let h = b.scheduler_mut().take_due().unwrap();
    assert!(b.on_animation_frame(h, 5000.0));
    assert_eq!(b.grain().offset(), crate::foundation::core::Vec2::ZERO);
    assert_eq!(b.grain().last_timestamp(), Some(5000.0));
}

#[test]
fn pointer_origin_tracks_element_moves_without_resize() {
    let mut b = backdrop(seeded());
    b.mount();
    // Scrolled down by 100; same size, so no resize notification.
    b.host_mut().set_measurement(HostMeasurement {
        element: crate::foundation::core::Rect::new(0.0, -100.0, 800.0, 500.0),
        parent: None,
        viewport: Size::new(800.0, 600.0),
        device_pixel_ratio: 1.0,
    });
    b.on_pointer(&PointerEvent::Move {
        client: Point::new(10.0, 10.0),
    });
    assert!(close(b.pointer_target(), Point::new(10.0, 110.0)));
}

#[test]
fn pointer_handle_writes_reach_the_next_frame() {
    let mut b = backdrop(seeded());
    b.mount();
    let handle = b.pointer_handle();
    handle.set_target(Point::new(100.0, 100.0));
    assert!(close(b.pointer_target(), Point::new(100.0, 100.0)));

    let h = b.scheduler_mut().take_due().unwrap();
    assert!(b.on_animation_frame(h, 16.0));
    assert!(close(b.focal(), Point::new(409.4, 200.1)));
}
