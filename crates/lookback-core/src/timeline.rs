//! The authored story: which phase drives what.
//!
//! `Timeline::evaluate` is the pure half of the engine. It maps one progress
//! value to targets and opacities and holds no state, so the same progress
//! always evaluates the same way. [`crate::Narrative`] adds the per-frame
//! smoothing on top.

use crate::camera::{lat_lon_to_vec3, CameraLeg, CameraPose, CameraRig};
use crate::constants::*;
use crate::error::TimelineError;
use crate::phase::{EntityState, Phase, Window};
use crate::visual::{BodyId, CaptionId};
use glam::Vec3;

/// How a body turns about its Y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Spin {
    /// Rotation target follows a phase: `appear(phase) * radians`.
    Scroll { phase: Phase, radians: f32 },
    /// Constant increment every rendered frame, independent of scroll.
    Idle { per_frame: f32 },
}

/// Position offset from the anchor that follows a phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drift {
    pub phase: Phase,
    pub offset: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyTrack {
    pub id: BodyId,
    pub window: Window,
    pub anchor: Vec3,
    pub spin: Spin,
    pub drift: Option<Drift>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionTrack {
    pub id: CaptionId,
    pub window: Window,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub max_phases: f32,
    pub smoothing: f32,
    pub camera: CameraRig,
    pub bodies: Vec<BodyTrack>,
    pub captions: Vec<CaptionTrack>,
}

/// Targets for one body at one progress value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyTarget {
    pub id: BodyId,
    pub position: Vec3,
    /// `Some` for scroll-driven spin; idle spin has no target.
    pub rotation_y: Option<f32>,
    pub opacity: f32,
    pub state: EntityState,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionTarget {
    pub id: CaptionId,
    pub opacity: f32,
    pub state: EntityState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub progress: f32,
    pub camera: CameraPose,
    pub bodies: Vec<BodyTarget>,
    pub captions: Vec<CaptionTarget>,
}

impl Timeline {
    pub fn validate(&self) -> Result<(), TimelineError> {
        if !self.max_phases.is_finite() {
            return Err(TimelineError::NonFinite {
                what: "max_phases",
                value: self.max_phases,
            });
        }
        if self.max_phases <= 0.0 {
            return Err(TimelineError::NonPositiveSpan {
                span: self.max_phases,
            });
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(TimelineError::NotUnit {
                what: "smoothing",
                value: self.smoothing,
            });
        }
        let max = self.max_phases;
        for leg in &self.camera.legs {
            leg.phase.validate()?;
            if leg.phase.start < 0.0 || leg.phase.start > max {
                return Err(TimelineError::OutOfDomain {
                    what: "camera leg",
                    start: leg.phase.start,
                    max,
                });
            }
            if !(0.0..=1.0).contains(&leg.reach) {
                return Err(TimelineError::NotUnit {
                    what: "camera leg reach",
                    value: leg.reach,
                });
            }
        }
        for body in &self.bodies {
            body.window.validate(max, "body window")?;
            if let Spin::Scroll { phase, .. } = body.spin {
                phase.validate()?;
            }
            if let Some(drift) = body.drift {
                drift.phase.validate()?;
            }
        }
        for caption in &self.captions {
            caption.window.validate(max, "caption window")?;
        }
        Ok(())
    }

    pub fn body(&self, id: BodyId) -> Option<&BodyTrack> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn evaluate(&self, progress: f32) -> Evaluation {
        let bodies = self
            .bodies
            .iter()
            .map(|track| {
                let drift = track
                    .drift
                    .map_or(Vec3::ZERO, |d| d.offset * d.phase.appear(progress));
                let rotation_y = match track.spin {
                    Spin::Scroll { phase, radians } => Some(phase.appear(progress) * radians),
                    Spin::Idle { .. } => None,
                };
                BodyTarget {
                    id: track.id,
                    position: track.anchor + drift,
                    rotation_y,
                    opacity: track.window.opacity(progress),
                    state: track.window.state(progress),
                }
            })
            .collect();
        let captions = self
            .captions
            .iter()
            .map(|track| CaptionTarget {
                id: track.id,
                opacity: track.window.opacity(progress),
                state: track.window.state(progress),
            })
            .collect();
        Evaluation {
            progress,
            camera: self.camera.pose_at(progress),
            bodies,
            captions,
        }
    }
}

impl Default for Timeline {
    /// The published page.
    ///
    /// | progress  | on screen                                     |
    /// |-----------|-----------------------------------------------|
    /// | 0.0 – 1.0 | camera zooms toward Belgium, globe turns      |
    /// | 1.0 – 1.5 | Belgium caption fades, globe rises and fades  |
    /// | 1.5 – 2.5 | Hubble                                        |
    /// | 2.5 – 3.4 | Chandra                                       |
    /// | 3.1 –     | outro                                         |
    fn default() -> Self {
        let start = CameraPose {
            eye: Vec3::from(CAMERA_START_EYE),
            target: Vec3::ZERO,
        };
        let belgium = CameraPose {
            eye: lat_lon_to_vec3(BELGIUM_LAT_DEG, BELGIUM_LON_DEG, ZOOM_RADIUS),
            target: Vec3::ZERO,
        };
        let hubble = Vec3::from(HUBBLE_ANCHOR);
        let chandra = Vec3::from(CHANDRA_ANCHOR);
        let view_offset = Vec3::from(TELESCOPE_VIEW_OFFSET);

        let zoom = Phase::new(0.0, 1.0);
        let exit = Phase::new(1.0, 0.5);

        let hubble_window = Window::new(
            Phase::leading(1.5, 0.5, SECTION_ENTRY_RATE),
            Phase::new(2.0, 0.5),
        );
        let chandra_window = Window::new(
            Phase::leading(2.5, 0.5, SECTION_ENTRY_RATE),
            Phase::new(3.0, 0.4),
        );

        Self {
            max_phases: MAX_PHASES,
            smoothing: SMOOTHING_FACTOR,
            camera: CameraRig {
                start,
                legs: vec![
                    CameraLeg {
                        to: belgium,
                        phase: zoom,
                        reach: ZOOM_REACH,
                    },
                    CameraLeg {
                        to: CameraPose {
                            eye: hubble + view_offset,
                            target: hubble,
                        },
                        phase: Phase::new(1.2, 0.4),
                        reach: 1.0,
                    },
                    CameraLeg {
                        to: CameraPose {
                            eye: chandra + view_offset,
                            target: chandra,
                        },
                        phase: Phase::new(2.2, 0.4),
                        reach: 1.0,
                    },
                ],
            },
            bodies: vec![
                BodyTrack {
                    id: BodyId::Earth,
                    window: Window::exiting(Phase::new(1.3, 0.3)),
                    anchor: Vec3::ZERO,
                    spin: Spin::Scroll {
                        phase: zoom,
                        radians: EARTH_ZOOM_SPIN,
                    },
                    drift: Some(Drift {
                        phase: exit,
                        offset: Vec3::new(0.0, EARTH_EXIT_DRIFT, 0.0),
                    }),
                },
                BodyTrack {
                    id: BodyId::Hubble,
                    window: hubble_window,
                    anchor: hubble,
                    spin: Spin::Idle {
                        per_frame: HUBBLE_SPIN_PER_FRAME,
                    },
                    drift: None,
                },
                BodyTrack {
                    id: BodyId::Chandra,
                    window: chandra_window,
                    anchor: chandra,
                    spin: Spin::Idle {
                        per_frame: CHANDRA_SPIN_PER_FRAME,
                    },
                    drift: None,
                },
            ],
            captions: vec![
                CaptionTrack {
                    id: CaptionId::Belgium,
                    window: Window::new(Phase::new(0.6, 0.4), Phase::new(1.0, 0.3)),
                },
                CaptionTrack {
                    id: CaptionId::Hubble,
                    window: hubble_window,
                },
                CaptionTrack {
                    id: CaptionId::Chandra,
                    window: chandra_window,
                },
                CaptionTrack {
                    id: CaptionId::Outro,
                    window: Window::entering(Phase::new(3.1, 0.3)),
                },
            ],
        }
    }
}
