// Host-side tests for the inline style strings the page writes.

mod style {
    include!("../src/style.rs");
}

use style::*;

#[test]
fn opacity_is_clamped_and_fixed_width() {
    assert_eq!(opacity_value(0.5), "0.500");
    assert_eq!(opacity_value(1.2), "1.000");
    assert_eq!(opacity_value(-0.1), "0.000");
}

#[test]
fn hidden_only_at_zero() {
    assert_eq!(visibility_value(0.0), "hidden");
    assert_eq!(visibility_value(0.001), "visible");
    assert_eq!(visibility_value(1.0), "visible");
}

#[test]
fn unit_transform_omits_identity_scale() {
    assert_eq!(unit_transform(20.0, 1.0), "translateY(20.0px)");
    assert_eq!(unit_transform(0.0, 0.8), "translateY(0.0px) scale(0.800)");
}

#[test]
fn small_opacity_changes_are_skipped() {
    assert!(opacity_changed(None, 0.3, 0.01));
    assert!(!opacity_changed(Some(0.300), 0.305, 0.01));
    assert!(opacity_changed(Some(0.300), 0.320, 0.01));
}

#[test]
fn ramp_ends_are_always_written() {
    // a sub-epsilon step onto 0 or 1 still lands
    assert!(opacity_changed(Some(0.995), 1.0, 0.01));
    assert!(opacity_changed(Some(0.004), 0.0, 0.01));
    assert!(!opacity_changed(Some(1.0), 1.0, 0.01));
}
