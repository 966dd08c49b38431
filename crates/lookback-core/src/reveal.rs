//! One-shot text entrances: whole-block fades and letter/word trails.
//!
//! Unlike the scroll phases these are time driven and fire once. After the
//! first trigger the reveal runs forward to completion and never re-arms,
//! even if the text scrolls out of view and back.

use crate::constants::*;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealKind {
    FadeUp,
    FadeIn,
    ScaleIn,
    LetterByLetter,
    WordByWord,
}

impl RevealKind {
    /// Trail kinds animate each unit separately.
    pub fn is_trail(self) -> bool {
        matches!(self, RevealKind::LetterByLetter | RevealKind::WordByWord)
    }
}

impl FromStr for RevealKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fade-up" | "" => Ok(RevealKind::FadeUp),
            "fade-in" => Ok(RevealKind::FadeIn),
            "scale-in" => Ok(RevealKind::ScaleIn),
            "letters" | "letter-by-letter" => Ok(RevealKind::LetterByLetter),
            "words" | "word-by-word" => Ok(RevealKind::WordByWord),
            other => Err(format!("unknown reveal kind '{other}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealTrigger {
    /// Start when the element first intersects the viewport.
    OnView,
    /// Start as soon as the element is mounted.
    Immediate,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    pub kind: RevealKind,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub stagger_ms: f64,
    pub trigger: RevealTrigger,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            kind: RevealKind::FadeUp,
            delay_ms: 0.0,
            duration_ms: REVEAL_DURATION_MS,
            stagger_ms: REVEAL_STAGGER_MS,
            trigger: RevealTrigger::OnView,
        }
    }
}

impl RevealOptions {
    /// Build options from raw `data-reveal*` attribute values. Unknown or
    /// malformed values fall back to defaults with a warning.
    pub fn from_attributes(
        kind: Option<&str>,
        delay: Option<&str>,
        duration: Option<&str>,
        trigger: Option<&str>,
    ) -> Self {
        let mut opts = Self::default();
        if let Some(k) = kind {
            match k.parse() {
                Ok(kind) => opts.kind = kind,
                Err(e) => log::warn!("[reveal] {e}; using fade-up"),
            }
        }
        if let Some(ms) = delay.and_then(parse_ms) {
            opts.delay_ms = ms;
        }
        if let Some(ms) = duration.and_then(parse_ms) {
            opts.duration_ms = ms;
        }
        if let Some(t) = trigger {
            opts.trigger = match t.trim() {
                "immediate" => RevealTrigger::Immediate,
                _ => RevealTrigger::OnView,
            };
        }
        opts
    }

    /// Running time of a single unit. Trails split the duration in half so the
    /// stagger doesn't drag the whole line out.
    #[inline]
    pub fn unit_duration_ms(&self) -> f64 {
        if self.kind.is_trail() {
            self.duration_ms / 2.0
        } else {
            self.duration_ms
        }
    }
}

fn parse_ms(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim().trim_end_matches("ms").parse().ok()?;
    (v.is_finite() && v >= 0.0).then_some(v)
}

/// Split text into animation units.
///
/// Letters keep every char, spaces included. Words split on single spaces and
/// all but the last keep a trailing space so the line reflows unchanged.
/// Non-trail kinds animate the block as a single unit.
pub fn split_units(text: &str, kind: RevealKind) -> Vec<String> {
    match kind {
        RevealKind::LetterByLetter => text.chars().map(String::from).collect(),
        RevealKind::WordByWord => {
            let words: Vec<&str> = text.split(' ').collect();
            let last = words.len().saturating_sub(1);
            words
                .into_iter()
                .enumerate()
                .map(|(i, w)| if i < last { format!("{w} ") } else { w.to_string() })
                .collect()
        }
        _ => vec![text.to_string()],
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Style of one unit at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitStyle {
    pub opacity: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl UnitStyle {
    /// Where a unit of `kind` starts before its reveal runs.
    pub fn from_state(kind: RevealKind) -> Self {
        match kind {
            RevealKind::FadeUp => Self {
                opacity: 0.0,
                offset_y: FADE_UP_OFFSET_PX,
                scale: 1.0,
            },
            RevealKind::ScaleIn => Self {
                opacity: 0.0,
                offset_y: 0.0,
                scale: SCALE_IN_FROM,
            },
            RevealKind::FadeIn => Self {
                opacity: 0.0,
                offset_y: 0.0,
                scale: 1.0,
            },
            RevealKind::LetterByLetter | RevealKind::WordByWord => Self {
                opacity: 0.0,
                offset_y: TRAIL_OFFSET_PX,
                scale: 1.0,
            },
        }
    }

    pub const SETTLED: UnitStyle = UnitStyle {
        opacity: 1.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    fn blend(from: UnitStyle, to: UnitStyle, t: f32) -> Self {
        Self {
            opacity: from.opacity + (to.opacity - from.opacity) * t,
            offset_y: from.offset_y + (to.offset_y - from.offset_y) * t,
            scale: from.scale + (to.scale - from.scale) * t,
        }
    }
}

/// State of one revealed text block.
#[derive(Clone, Debug)]
pub struct TextReveal {
    options: RevealOptions,
    units: Vec<String>,
    started_at_ms: Option<f64>,
}

impl TextReveal {
    pub fn new(text: &str, options: RevealOptions) -> Self {
        Self {
            units: split_units(text, options.kind),
            options,
            started_at_ms: None,
        }
    }

    #[inline]
    pub fn units(&self) -> &[String] {
        &self.units
    }

    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.started_at_ms.is_some()
    }

    /// Start the reveal. Returns `false` when it had already started; the
    /// original start time is kept.
    pub fn trigger(&mut self, now_ms: f64) -> bool {
        if self.started_at_ms.is_some() {
            return false;
        }
        self.started_at_ms = Some(now_ms);
        true
    }

    /// Offset of unit `index` from the trigger time.
    #[inline]
    pub fn unit_start_ms(&self, index: usize) -> f64 {
        let stagger = if self.options.kind.is_trail() {
            index as f64 * self.options.stagger_ms
        } else {
            0.0
        };
        self.options.delay_ms + stagger
    }

    /// Time from trigger until the last unit settles.
    pub fn total_ms(&self) -> f64 {
        let last = self.units.len().saturating_sub(1);
        self.unit_start_ms(last) + self.options.unit_duration_ms()
    }

    pub fn unit_style(&self, index: usize, now_ms: f64) -> UnitStyle {
        let from = UnitStyle::from_state(self.options.kind);
        let Some(t0) = self.started_at_ms else {
            return from;
        };
        let duration = self.options.unit_duration_ms();
        let elapsed = now_ms - t0 - self.unit_start_ms(index);
        let t = if duration > 0.0 {
            (elapsed / duration).clamp(0.0, 1.0)
        } else if elapsed >= 0.0 {
            1.0
        } else {
            0.0
        };
        UnitStyle::blend(from, UnitStyle::SETTLED, ease_out_cubic(t) as f32)
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.started_at_ms
            .is_some_and(|t0| now_ms - t0 >= self.total_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ms_accepts_suffix_and_rejects_negative() {
        assert_eq!(parse_ms("250"), Some(250.0));
        assert_eq!(parse_ms(" 120ms "), Some(120.0));
        assert_eq!(parse_ms("-5"), None);
        assert_eq!(parse_ms("soon"), None);
    }

    #[test]
    fn ease_is_pinned_at_the_ends() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }
}
