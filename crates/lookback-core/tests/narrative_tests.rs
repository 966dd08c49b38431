// Host-side tests for the narrative: camera path, smoothing, reversibility.

use glam::Vec3;
use lookback_core::*;

fn progress(x: f32) -> ScrollProgress {
    ScrollProgress::new(x, constants::MAX_PHASES)
}

#[test]
fn default_timeline_is_valid() {
    Timeline::default().validate().expect("authored timeline validates");
}

#[test]
fn validate_rejects_broken_timelines() {
    let mut t = Timeline::default();
    t.captions[0].window.enter = Some(Phase::new(0.2, 0.0));
    assert!(matches!(
        t.validate(),
        Err(TimelineError::NonPositiveSpan { .. })
    ));

    let mut t = Timeline::default();
    t.bodies[1].window.exit = Some(Phase::new(t.max_phases + 1.0, 0.5));
    assert!(matches!(t.validate(), Err(TimelineError::OutOfDomain { .. })));

    let mut t = Timeline::default();
    t.camera.legs[0].reach = 1.5;
    assert!(matches!(t.validate(), Err(TimelineError::NotUnit { .. })));

    let mut t = Timeline::default();
    t.max_phases = f32::NAN;
    assert!(matches!(t.validate(), Err(TimelineError::NonFinite { .. })));
}

#[test]
fn camera_leg_is_exact_linear_interpolation() {
    let start = CameraPose {
        eye: Vec3::new(0.0, 0.0, 5.0),
        target: Vec3::ZERO,
    };
    let end = Vec3::new(1.4, 1.7, -0.1);
    let rig = CameraRig {
        start,
        legs: vec![CameraLeg {
            to: CameraPose {
                eye: end,
                target: Vec3::ZERO,
            },
            phase: Phase::new(0.0, 1.0),
            reach: 0.8,
        }],
    };
    let pose = rig.pose_at(1.0);
    assert_eq!(pose.eye, start.eye + (end - start.eye) * 0.8);
    assert_eq!(pose.target, Vec3::ZERO);
}

#[test]
fn camera_follows_scroll_without_lag() {
    let mut n = Narrative::new(Timeline::default());
    let expected = n.evaluate(0.5).camera;
    // a single frame lands exactly on the scroll-driven pose
    let frame = n.advance(progress(0.5));
    assert_eq!(frame.camera, expected);
}

#[test]
fn camera_path_is_continuous_across_legs() {
    let rig = Timeline::default().camera;
    let mut prev = rig.pose_at(0.0).eye;
    for i in 1..=700 {
        let x = i as f32 * 0.005;
        let eye = rig.pose_at(x).eye;
        assert!((eye - prev).length() < 0.2, "camera jumped at {x}");
        prev = eye;
    }
}

#[test]
fn zoom_ends_short_of_belgium() {
    let t = Timeline::default();
    let belgium = lat_lon_to_vec3(
        constants::BELGIUM_LAT_DEG,
        constants::BELGIUM_LON_DEG,
        constants::ZOOM_RADIUS,
    );
    let start = Vec3::from(constants::CAMERA_START_EYE);
    let eye = t.camera.pose_at(1.0).eye;
    assert!((eye - (start + (belgium - start) * constants::ZOOM_REACH)).length() < 1e-5);
}

#[test]
fn evaluation_is_idempotent() {
    let t = Timeline::default();
    for x in [0.0, 0.3, 0.8, 1.2, 1.75, 2.25, 2.9, 3.5] {
        assert_eq!(t.evaluate(x), t.evaluate(x));
    }
}

#[test]
fn earth_spin_is_smoothed_toward_scroll_target() {
    let mut n = Narrative::new(Timeline::default());
    let target = constants::EARTH_ZOOM_SPIN;
    let first = n.advance(progress(1.0));
    let earth = first.body(BodyId::Earth).expect("earth");
    assert!((earth.pose.rotation.y - target * constants::SMOOTHING_FACTOR).abs() < 1e-6);

    let mut last = earth.pose.rotation.y;
    for _ in 0..120 {
        last = n
            .advance(progress(1.0))
            .body(BodyId::Earth)
            .expect("earth")
            .pose
            .rotation
            .y;
    }
    assert!((last - target).abs() < 1e-3);
}

#[test]
fn idle_spin_advances_every_frame_even_without_scroll() {
    let mut n = Narrative::new(Timeline::default());
    let a = n.advance(progress(1.75));
    let b = n.advance(progress(1.75));
    let ya = a.body(BodyId::Hubble).expect("hubble").pose.rotation.y;
    let yb = b.body(BodyId::Hubble).expect("hubble").pose.rotation.y;
    assert!((yb - ya - constants::HUBBLE_SPIN_PER_FRAME).abs() < 1e-6);
}

#[test]
fn scrolling_back_restores_every_derived_factor() {
    let mut n = Narrative::new(Timeline::default());
    let before = n.advance(progress(0.8));
    for x in [1.2, 1.9, 2.4, 3.3] {
        n.advance(progress(x));
    }
    let after = n.advance(progress(0.8));

    assert_eq!(before.camera, after.camera);
    for (a, b) in before.bodies.iter().zip(&after.bodies) {
        assert_eq!(a.opacity, b.opacity);
        assert_eq!(a.state, b.state);
    }
    assert_eq!(before.captions, after.captions);
}

#[test]
fn hidden_bodies_are_flagged_invisible() {
    let mut n = Narrative::new(Timeline::default());
    let f = n.advance(progress(0.2));
    assert!(f.body(BodyId::Earth).expect("earth").pose.visible);
    assert!(!f.body(BodyId::Hubble).expect("hubble").pose.visible);
    assert!(!f.body(BodyId::Chandra).expect("chandra").pose.visible);

    let f = n.advance(progress(3.45));
    assert!(!f.body(BodyId::Earth).expect("earth").pose.visible);
    assert!(!f.body(BodyId::Chandra).expect("chandra").pose.visible);
}

#[test]
fn captions_and_bodies_read_from_the_same_record() {
    let mut n = Narrative::new(Timeline::default());
    let f = n.advance(progress(2.25));
    let body = f.body(BodyId::Hubble).expect("hubble");
    let caption = f.caption(CaptionId::Hubble).expect("caption");
    assert_eq!(body.opacity, caption.opacity);
    assert_eq!(body.state, caption.state);
    assert_eq!(f.leading_caption().map(|c| c.id), Some(CaptionId::Hubble));
}

#[test]
fn packed_instances_are_sorted_back_to_front() {
    let mut n = Narrative::new(Timeline::default());
    let f = n.advance(progress(1.75));
    let cam = Camera::from_pose(f.camera, 16.0 / 9.0);
    let view = cam.view_matrix();
    let instances = pack_instances(&f, &BodyModels::default(), view);
    assert!(!instances.is_empty());
    let depths: Vec<f32> = instances
        .iter()
        .map(|i| view.transform_point3(Vec3::from(i.center)).z)
        .collect();
    assert!(depths.windows(2).all(|w| w[0] <= w[1]));
    assert!(instances.iter().all(|i| i.color[3] > 0.0 && i.color[3] <= 1.0));
}

#[test]
fn progress_is_clamped_to_the_domain() {
    assert_eq!(progress(-2.0).value(), 0.0);
    assert_eq!(progress(99.0).value(), constants::MAX_PHASES);
    assert_eq!(progress(f32::NAN).value(), 0.0);
}
