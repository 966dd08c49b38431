//! Procedural stand-ins for the three subjects.
//!
//! Each body is a handful of lit sphere impostors placed in model space. The
//! renderers draw them as camera-facing quads from one instance buffer,
//! sorted back to front for alpha blending.

use crate::pose::Pose;
use crate::visual::{BodyId, FrameVisuals};
use glam::{Mat4, Vec3};
use smallvec::{smallvec, SmallVec};

/// Shading selector read by the impostor shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Surface {
    Matte = 0,
    Globe = 1,
    Panel = 2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub offset: Vec3,
    pub radius: f32,
    pub color: [f32; 3],
    pub surface: Surface,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BodyModel {
    pub parts: SmallVec<[Part; 6]>,
}

impl BodyModel {
    pub fn for_body(id: BodyId) -> Self {
        match id {
            BodyId::Earth => Self::globe(),
            BodyId::Hubble => Self::telescope([0.78, 0.80, 0.84], 0.085, 0.13, [0.22, 0.30, 0.62]),
            BodyId::Chandra => Self::telescope([0.86, 0.70, 0.36], 0.07, 0.16, [0.18, 0.26, 0.55]),
        }
    }

    fn globe() -> Self {
        Self {
            parts: smallvec![Part {
                offset: Vec3::ZERO,
                radius: 1.0,
                color: [0.16, 0.34, 0.72],
                surface: Surface::Globe,
            }],
        }
    }

    /// Three hull segments along Z with a solar panel either side.
    fn telescope(hull: [f32; 3], hull_radius: f32, panel_reach: f32, panel: [f32; 3]) -> Self {
        let step = hull_radius * 1.4;
        let mut parts: SmallVec<[Part; 6]> = (-1..=1)
            .map(|i| Part {
                offset: Vec3::new(0.0, 0.0, i as f32 * step),
                radius: hull_radius,
                color: hull,
                surface: Surface::Matte,
            })
            .collect();
        for side in [-1.0_f32, 1.0] {
            parts.push(Part {
                offset: Vec3::new(side * (hull_radius + panel_reach), 0.0, 0.0),
                radius: hull_radius * 0.8,
                color: panel,
                surface: Surface::Panel,
            });
        }
        Self { parts }
    }
}

/// Models for every body, indexed by [`BodyId::index`].
#[derive(Clone, Debug)]
pub struct BodyModels {
    models: [BodyModel; 3],
}

impl Default for BodyModels {
    fn default() -> Self {
        Self {
            models: BodyId::ALL.map(BodyModel::for_body),
        }
    }
}

impl BodyModels {
    #[inline]
    pub fn get(&self, id: BodyId) -> &BodyModel {
        &self.models[id.index()]
    }

    pub fn max_instances(&self) -> usize {
        self.models.iter().map(|m| m.parts.len()).sum()
    }
}

/// GPU instance record for one sphere impostor.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
    pub spin: f32,
    pub surface: u32,
}

fn part_instance(pose: &Pose, part: &Part, opacity: f32) -> BodyInstance {
    BodyInstance {
        center: pose.transform_point(part.offset).to_array(),
        radius: part.radius * pose.scale,
        color: [part.color[0], part.color[1], part.color[2], opacity],
        spin: pose.rotation.y,
        surface: part.surface as u32,
    }
}

/// Flatten visible bodies into impostor instances sorted farthest first in
/// view space.
pub fn pack_instances(visuals: &FrameVisuals, models: &BodyModels, view: Mat4) -> Vec<BodyInstance> {
    let mut out: Vec<(f32, BodyInstance)> = Vec::with_capacity(models.max_instances());
    for body in &visuals.bodies {
        if !body.pose.visible || body.opacity <= 0.0 {
            continue;
        }
        for part in &models.get(body.id).parts {
            let inst = part_instance(&body.pose, part, body.opacity);
            let depth = view.transform_point3(Vec3::from(inst.center)).z;
            out.push((depth, inst));
        }
    }
    // right-handed view space: more negative z is farther away
    out.sort_by(|a, b| a.0.total_cmp(&b.0));
    out.into_iter().map(|(_, inst)| inst).collect()
}
