// Inline style values written by the overlay and the reveals.
// Pure string formatting so it can be tested on the host.

#[inline]
pub fn opacity_value(opacity: f32) -> String {
    format!("{:.3}", opacity.clamp(0.0, 1.0))
}

/// Hidden captions stop taking pointer events and leave the accessibility
/// tree; a fully transparent block would otherwise still intercept clicks.
#[inline]
pub fn visibility_value(opacity: f32) -> &'static str {
    if opacity > 0.0 {
        "visible"
    } else {
        "hidden"
    }
}

#[inline]
pub fn unit_transform(offset_y: f32, scale: f32) -> String {
    if scale == 1.0 {
        format!("translateY({:.1}px)", offset_y)
    } else {
        format!("translateY({:.1}px) scale({:.3})", offset_y, scale)
    }
}

/// Whether a new opacity differs enough from the last written one to touch
/// the DOM.
#[inline]
pub fn opacity_changed(previous: Option<f32>, next: f32, epsilon: f32) -> bool {
    match previous {
        None => true,
        // always land exactly on the ends of the ramp
        Some(prev) if next == 0.0 || next == 1.0 => prev != next,
        Some(prev) => (prev - next).abs() >= epsilon,
    }
}
