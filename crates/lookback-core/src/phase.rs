//! Phase evaluation: clamped linear remaps from global progress to local
//! factors in \[0, 1\].
//!
//! Everything here is a pure function of progress. Evaluating the same value
//! twice gives the same answer, and scrolling back up undoes every effect.

use crate::error::TimelineError;

/// `clamp((progress - start) / span, 0, 1)`.
///
/// A non-positive span degenerates to a step at `start` instead of dividing
/// by zero.
#[inline]
pub fn appear(progress: f32, start: f32, span: f32) -> f32 {
    if span.is_nan() || span <= 0.0 {
        return if progress >= start { 1.0 } else { 0.0 };
    }
    let t = (progress - start) / span;
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, 1.0)
}

/// Exit ramp: 1 until `start`, then falls linearly to 0 over `span`.
#[inline]
pub fn fade(progress: f32, start: f32, span: f32) -> f32 {
    if progress > start {
        if span.is_nan() || span <= 0.0 {
            return 0.0;
        }
        let f = 1.0 - (progress - start) / span;
        if f.is_nan() {
            return 0.0;
        }
        f.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// A named sub-interval `[start, start + span]` of the progress domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phase {
    pub start: f32,
    pub span: f32,
}

impl Phase {
    /// Unchecked constructor for authored constants; see [`Phase::validate`].
    pub const fn new(start: f32, span: f32) -> Self {
        Self { start, span }
    }

    pub fn try_new(start: f32, span: f32) -> Result<Self, TimelineError> {
        let phase = Self { start, span };
        phase.validate()?;
        Ok(phase)
    }

    /// Phase covering the first `1 / rate` of a section, the way a section
    /// reaches full opacity early and holds it.
    pub fn leading(section_start: f32, section_span: f32, rate: f32) -> Self {
        Self {
            start: section_start,
            span: section_span / rate,
        }
    }

    pub fn validate(&self) -> Result<(), TimelineError> {
        if !self.start.is_finite() {
            return Err(TimelineError::NonFinite {
                what: "phase start",
                value: self.start,
            });
        }
        if !self.span.is_finite() {
            return Err(TimelineError::NonFinite {
                what: "phase span",
                value: self.span,
            });
        }
        if self.span <= 0.0 {
            return Err(TimelineError::NonPositiveSpan { span: self.span });
        }
        Ok(())
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.span
    }

    #[inline]
    pub fn appear(&self, progress: f32) -> f32 {
        appear(progress, self.start, self.span)
    }

    #[inline]
    pub fn fade(&self, progress: f32) -> f32 {
        fade(progress, self.start, self.span)
    }
}

/// Where an entity sits in its entry/exit cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityState {
    Hidden,
    Entering,
    Visible,
    Exiting,
}

impl EntityState {
    pub fn is_shown(self) -> bool {
        !matches!(self, EntityState::Hidden)
    }
}

/// Entry ramp and exit ramp for one entity.
///
/// A missing entry ramp means the entity is on screen from progress 0; a
/// missing exit ramp means it never leaves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub enter: Option<Phase>,
    pub exit: Option<Phase>,
}

impl Window {
    pub const ALWAYS: Window = Window {
        enter: None,
        exit: None,
    };

    pub const fn new(enter: Phase, exit: Phase) -> Self {
        Self {
            enter: Some(enter),
            exit: Some(exit),
        }
    }

    pub const fn entering(enter: Phase) -> Self {
        Self {
            enter: Some(enter),
            exit: None,
        }
    }

    pub const fn exiting(exit: Phase) -> Self {
        Self {
            enter: None,
            exit: Some(exit),
        }
    }

    #[inline]
    pub fn appear(&self, progress: f32) -> f32 {
        self.enter.map_or(1.0, |p| p.appear(progress))
    }

    #[inline]
    pub fn fade(&self, progress: f32) -> f32 {
        self.exit.map_or(1.0, |p| p.fade(progress))
    }

    /// `appear * fade`. Overlapping windows of different entities are
    /// evaluated independently and never normalized against each other.
    #[inline]
    pub fn opacity(&self, progress: f32) -> f32 {
        self.appear(progress) * self.fade(progress)
    }

    pub fn state(&self, progress: f32) -> EntityState {
        let appear = self.appear(progress);
        let fade = self.fade(progress);
        if appear * fade <= 0.0 {
            EntityState::Hidden
        } else if fade < 1.0 {
            EntityState::Exiting
        } else if appear < 1.0 {
            EntityState::Entering
        } else {
            EntityState::Visible
        }
    }

    pub fn validate(&self, max_progress: f32, what: &'static str) -> Result<(), TimelineError> {
        for phase in self.enter.iter().chain(self.exit.iter()) {
            phase.validate()?;
            if phase.start < 0.0 || phase.start > max_progress {
                return Err(TimelineError::OutOfDomain {
                    what,
                    start: phase.start,
                    max: max_progress,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_span_is_a_step() {
        assert_eq!(appear(0.99, 1.0, 0.0), 0.0);
        assert_eq!(appear(1.0, 1.0, 0.0), 1.0);
        assert_eq!(fade(1.0, 1.0, 0.0), 1.0);
        assert_eq!(fade(1.01, 1.0, 0.0), 0.0);
    }

    #[test]
    fn nan_progress_reads_as_hidden() {
        let w = Window::new(Phase::new(0.0, 1.0), Phase::new(2.0, 1.0));
        assert_eq!(w.opacity(f32::NAN), 0.0);
        assert_eq!(w.state(f32::NAN), EntityState::Hidden);
    }

    #[test]
    fn try_new_rejects_bad_spans() {
        assert!(Phase::try_new(0.0, 0.0).is_err());
        assert!(Phase::try_new(0.0, -1.0).is_err());
        assert!(Phase::try_new(f32::INFINITY, 1.0).is_err());
        assert!(Phase::try_new(0.5, 0.25).is_ok());
    }
}
