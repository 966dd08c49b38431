// Host-side tests for phase evaluation and the per-entity state machine.

use lookback_core::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

/// Progress samples covering the default domain plus a margin either side.
fn sweep(max: f32) -> impl Iterator<Item = f32> {
    (0..=400).map(move |i| -0.5 + (max + 1.0) * i as f32 / 400.0)
}

#[test]
fn appear_matches_documented_boundaries() {
    let p = Phase::new(0.6, 0.4);
    assert_eq!(p.appear(0.6), 0.0);
    assert_eq!(p.appear(1.0), 1.0);
    assert!(close(p.appear(0.8), 0.5), "appear(0.8) = {}", p.appear(0.8));
}

#[test]
fn appear_is_monotonic_inside_its_phase() {
    let p = Phase::new(1.25, 0.75);
    assert_eq!(p.appear(p.start), 0.0);
    assert_eq!(p.appear(p.end()), 1.0);
    let mut prev = p.appear(p.start);
    for i in 1..=100 {
        let x = p.start + p.span * i as f32 / 100.0;
        let a = p.appear(x);
        assert!(a >= prev, "appear decreased at {x}");
        prev = a;
    }
}

#[test]
fn appear_never_extrapolates() {
    let p = Phase::new(1.0, 0.5);
    assert_eq!(p.appear(-3.0), 0.0);
    assert_eq!(p.appear(0.99), 0.0);
    assert_eq!(p.appear(1.6), 1.0);
    assert_eq!(p.appear(50.0), 1.0);
}

#[test]
fn fade_holds_until_start_then_falls() {
    assert_eq!(fade(1.0, 2.0, 0.5), 1.0);
    assert_eq!(fade(2.0, 2.0, 0.5), 1.0);
    assert!(close(fade(2.25, 2.0, 0.5), 0.5));
    assert_eq!(fade(2.6, 2.0, 0.5), 0.0);
}

#[test]
fn hubble_composite_opacity() {
    let timeline = Timeline::default();
    let hubble = timeline.body(BodyId::Hubble).expect("hubble track").window;
    assert!(close(hubble.opacity(1.75), 1.0), "{}", hubble.opacity(1.75));
    assert!(close(hubble.opacity(2.25), 0.5), "{}", hubble.opacity(2.25));
    assert_eq!(hubble.opacity(2.6), 0.0);
}

#[test]
fn composite_is_the_product_of_both_ramps() {
    let w = Window::new(Phase::new(1.0, 1.0), Phase::new(1.5, 1.0));
    for x in sweep(4.0) {
        let expected = w.appear(x) * w.fade(x);
        assert_eq!(w.opacity(x), expected);
    }
    // overlap: half in, a quarter out
    assert!(close(w.opacity(1.75), 0.75 * 0.75));
}

#[test]
fn every_factor_stays_in_unit_range() {
    let timeline = Timeline::default();
    for x in sweep(timeline.max_phases) {
        let eval = timeline.evaluate(x);
        for b in &eval.bodies {
            assert!((0.0..=1.0).contains(&b.opacity), "{} opacity {} at {x}", b.id, b.opacity);
        }
        for c in &eval.captions {
            assert!((0.0..=1.0).contains(&c.opacity), "{} opacity {} at {x}", c.id, c.opacity);
        }
        for leg in &timeline.camera.legs {
            let t = leg.factor(x);
            assert!((0.0..=1.0).contains(&t));
        }
    }
}

#[test]
fn state_machine_walks_the_full_cycle() {
    let w = Window::new(Phase::new(1.0, 0.5), Phase::new(2.0, 0.5));
    assert_eq!(w.state(0.5), EntityState::Hidden);
    assert_eq!(w.state(1.0), EntityState::Hidden);
    assert_eq!(w.state(1.25), EntityState::Entering);
    assert_eq!(w.state(1.5), EntityState::Visible);
    assert_eq!(w.state(2.0), EntityState::Visible);
    assert_eq!(w.state(2.25), EntityState::Exiting);
    assert_eq!(w.state(2.5), EntityState::Hidden);
    assert_eq!(w.state(3.0), EntityState::Hidden);
}

#[test]
fn state_is_a_pure_function_of_progress() {
    let w = Window::new(Phase::new(1.0, 0.5), Phase::new(2.0, 0.5));
    let forward: Vec<_> = sweep(3.0).map(|x| w.state(x)).collect();
    // walk back down, then up again
    let backward: Vec<_> = sweep(3.0).collect::<Vec<_>>().into_iter().rev().map(|x| w.state(x)).collect();
    let again: Vec<_> = sweep(3.0).map(|x| w.state(x)).collect();
    assert_eq!(forward, again);
    assert_eq!(forward, backward.into_iter().rev().collect::<Vec<_>>());
}

#[test]
fn always_window_is_always_visible() {
    for x in sweep(3.0) {
        assert_eq!(Window::ALWAYS.opacity(x), 1.0);
        assert_eq!(Window::ALWAYS.state(x), EntityState::Visible);
    }
}
