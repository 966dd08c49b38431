//! Per-frame visual state shared by the 3D layer and the DOM overlay.
//!
//! One [`FrameVisuals`] is produced per frame and both consumers read the
//! same record, so the caption fading out and the model fading out can never
//! disagree about where the story is.

use crate::camera::CameraPose;
use crate::phase::EntityState;
use crate::pose::Pose;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyId {
    Earth,
    Hubble,
    Chandra,
}

impl BodyId {
    pub const ALL: [BodyId; 3] = [BodyId::Earth, BodyId::Hubble, BodyId::Chandra];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BodyId::Earth => "earth",
            BodyId::Hubble => "hubble",
            BodyId::Chandra => "chandra",
        }
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text blocks layered over the canvas, matched to DOM nodes by
/// `data-caption="<name>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptionId {
    Belgium,
    Hubble,
    Chandra,
    Outro,
}

impl CaptionId {
    pub const ALL: [CaptionId; 4] = [
        CaptionId::Belgium,
        CaptionId::Hubble,
        CaptionId::Chandra,
        CaptionId::Outro,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CaptionId::Belgium => "belgium",
            CaptionId::Hubble => "hubble",
            CaptionId::Chandra => "chandra",
            CaptionId::Outro => "outro",
        }
    }
}

impl fmt::Display for CaptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptionId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaptionId::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyVisual {
    pub id: BodyId,
    pub pose: Pose,
    pub opacity: f32,
    pub state: EntityState,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionVisual {
    pub id: CaptionId,
    pub opacity: f32,
    pub state: EntityState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameVisuals {
    pub progress: f32,
    pub camera: CameraPose,
    pub bodies: Vec<BodyVisual>,
    pub captions: Vec<CaptionVisual>,
}

impl FrameVisuals {
    pub fn body(&self, id: BodyId) -> Option<&BodyVisual> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn caption(&self, id: CaptionId) -> Option<&CaptionVisual> {
        self.captions.iter().find(|c| c.id == id)
    }

    /// The most opaque caption on screen, if any.
    pub fn leading_caption(&self) -> Option<&CaptionVisual> {
        self.captions
            .iter()
            .filter(|c| c.state.is_shown())
            .max_by(|a, b| a.opacity.total_cmp(&b.opacity))
    }
}
