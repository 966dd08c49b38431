use crate::interp::Smoothed;
use crate::phase::EntityState;
use crate::pose::Pose;
use crate::scroll::ScrollProgress;
use crate::timeline::{Evaluation, Spin, Timeline};
use crate::visual::{BodyVisual, CaptionVisual, FrameVisuals};
use glam::Vec3;
use std::f32::consts::TAU;

struct BodyMotion {
    position: Smoothed<Vec3>,
    rotation_y: Smoothed<f32>,
}

/// Owns the timeline and every body's pose.
///
/// Poses are mutated only through [`Narrative::advance`], which the frame
/// callback calls once per rendered frame whether or not the scroll position
/// moved. Scroll handlers never touch this type; they only publish progress.
pub struct Narrative {
    timeline: Timeline,
    motions: Vec<BodyMotion>,
    body_states: Vec<EntityState>,
    caption_states: Vec<EntityState>,
}

impl Narrative {
    pub fn new(timeline: Timeline) -> Self {
        let initial = timeline.evaluate(0.0);
        let motions = initial
            .bodies
            .iter()
            .map(|b| BodyMotion {
                position: Smoothed::new(b.position, timeline.smoothing),
                rotation_y: Smoothed::new(b.rotation_y.unwrap_or(0.0), timeline.smoothing),
            })
            .collect();
        let body_states = initial.bodies.iter().map(|b| b.state).collect();
        let caption_states = initial.captions.iter().map(|c| c.state).collect();
        Self {
            timeline,
            motions,
            body_states,
            caption_states,
        }
    }

    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Pure mapping from progress to targets; no smoothing, no state.
    #[inline]
    pub fn evaluate(&self, progress: f32) -> Evaluation {
        self.timeline.evaluate(progress)
    }

    /// Advance one frame: evaluate targets for `progress`, step every pose
    /// toward its target, and return the record both layers consume.
    pub fn advance(&mut self, progress: ScrollProgress) -> FrameVisuals {
        let eval = self.timeline.evaluate(progress.value());

        let mut bodies = Vec::with_capacity(eval.bodies.len());
        for ((target, track), motion) in eval
            .bodies
            .iter()
            .zip(&self.timeline.bodies)
            .zip(self.motions.iter_mut())
        {
            let position = motion.position.step(target.position);
            let rotation_y = match (target.rotation_y, track.spin) {
                (Some(angle), _) => motion.rotation_y.step(angle),
                (None, Spin::Idle { per_frame }) => {
                    let next = (motion.rotation_y.value() + per_frame).rem_euclid(TAU);
                    motion.rotation_y.snap(next);
                    next
                }
                (None, Spin::Scroll { .. }) => motion.rotation_y.value(),
            };
            bodies.push(BodyVisual {
                id: target.id,
                pose: Pose {
                    position,
                    rotation: Vec3::new(0.0, rotation_y, 0.0),
                    scale: 1.0,
                    visible: target.state.is_shown(),
                },
                opacity: target.opacity,
                state: target.state,
            });
        }

        for (target, last) in eval.bodies.iter().zip(self.body_states.iter_mut()) {
            if *last != target.state {
                log::info!(
                    "[narrative] {} {:?} -> {:?} at {:.3}",
                    target.id,
                    last,
                    target.state,
                    eval.progress
                );
                *last = target.state;
            }
        }
        for (target, last) in eval.captions.iter().zip(self.caption_states.iter_mut()) {
            if *last != target.state {
                log::info!(
                    "[narrative] caption {} {:?} -> {:?} at {:.3}",
                    target.id,
                    last,
                    target.state,
                    eval.progress
                );
                *last = target.state;
            }
        }

        FrameVisuals {
            progress: eval.progress,
            camera: eval.camera,
            bodies,
            captions: eval
                .captions
                .iter()
                .map(|c| CaptionVisual {
                    id: c.id,
                    opacity: c.opacity,
                    state: c.state,
                })
                .collect(),
        }
    }
}
