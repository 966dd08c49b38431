//! Scroll position to normalized story progress.

/// Normalized scroll position, always within `[0, max]` for the tracker that
/// produced it. Tracks the viewport, so it moves backward as readily as
/// forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    pub const ZERO: ScrollProgress = ScrollProgress(0.0);

    /// Clamp `raw` into `[0, max]`; NaN collapses to 0.
    pub fn new(raw: f32, max: f32) -> Self {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        if raw.is_nan() {
            return Self::ZERO;
        }
        Self(raw.clamp(0.0, max))
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }
}

/// Maps a container's bounding box against the viewport to progress.
///
/// The container is tall (several viewport heights) with a sticky stage
/// inside; progress is the number of viewport heights its top edge has
/// scrolled past the top of the viewport.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    max_phases: f32,
    latest: ScrollProgress,
}

impl ScrollTracker {
    pub fn new(max_phases: f32) -> Self {
        Self {
            max_phases,
            latest: ScrollProgress::ZERO,
        }
    }

    #[inline]
    pub fn max_phases(&self) -> f32 {
        self.max_phases
    }

    /// `clamp(-container_top / viewport_height, 0, max_phases)`.
    pub fn measure(&self, container_top: f32, viewport_height: f32) -> ScrollProgress {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return ScrollProgress::ZERO;
        }
        ScrollProgress::new(-container_top / viewport_height, self.max_phases)
    }

    /// Measure and remember the result as the latest value.
    pub fn update(&mut self, container_top: f32, viewport_height: f32) -> ScrollProgress {
        self.latest = self.measure(container_top, viewport_height);
        self.latest
    }

    #[inline]
    pub fn latest(&self) -> ScrollProgress {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_below_viewport_top_is_zero() {
        let t = ScrollTracker::new(3.0);
        assert_eq!(t.measure(120.0, 800.0).value(), 0.0);
    }

    #[test]
    fn progress_counts_viewport_heights() {
        let mut t = ScrollTracker::new(3.0);
        assert_eq!(t.update(-400.0, 800.0).value(), 0.5);
        assert_eq!(t.update(-1600.0, 800.0).value(), 2.0);
        assert_eq!(t.latest().value(), 2.0);
        // past the end of the container
        assert_eq!(t.update(-10_000.0, 800.0).value(), 3.0);
        // scrolling back up
        assert_eq!(t.update(-800.0, 800.0).value(), 1.0);
    }

    #[test]
    fn collapsed_viewport_yields_zero() {
        let t = ScrollTracker::new(3.0);
        assert_eq!(t.measure(-400.0, 0.0).value(), 0.0);
        assert_eq!(t.measure(-400.0, f32::NAN).value(), 0.0);
        assert_eq!(t.measure(-400.0, f32::INFINITY).value(), 0.0);
    }
}
