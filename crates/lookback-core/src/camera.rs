//! Camera description and the scroll-driven camera path.
//!
//! The path is evaluated with plain linear interpolation so the camera
//! answers scroll input immediately; only model poses are smoothed.

use crate::interp::lerp_vec3;
use crate::phase::Phase;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn from_pose(pose: CameraPose, aspect: f32) -> Self {
        Self {
            eye: pose.eye,
            target: pose.target,
            up: Vec3::Y,
            aspect: if aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: crate::constants::CAMERA_FOVY_DEG.to_radians(),
            znear: crate::constants::CAMERA_ZNEAR,
            zfar: crate::constants::CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Where the camera is and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    /// Yaw and pitch of the viewing direction in radians. Yaw is 0 looking
    /// down -Z and grows toward +X.
    pub fn heading(&self) -> (f32, f32) {
        let f = (self.target - self.eye).normalize_or_zero();
        if f == Vec3::ZERO {
            return (0.0, 0.0);
        }
        (f.x.atan2(-f.z), f.y.clamp(-1.0, 1.0).asin())
    }
}

/// One waypoint of the camera path.
///
/// While `phase` runs from 0 to 1 the camera travels from wherever the
/// previous legs left it toward `to`, covering `reach` of the distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraLeg {
    pub to: CameraPose,
    pub phase: Phase,
    pub reach: f32,
}

impl CameraLeg {
    #[inline]
    pub fn factor(&self, progress: f32) -> f32 {
        self.phase.appear(progress) * self.reach
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraRig {
    pub start: CameraPose,
    pub legs: Vec<CameraLeg>,
}

impl CameraRig {
    /// Fold the legs in order. Each leg interpolates from the pose the
    /// previous legs produced, so the path stays continuous at boundaries.
    pub fn pose_at(&self, progress: f32) -> CameraPose {
        self.legs.iter().fold(self.start, |pose, leg| {
            let t = leg.factor(progress);
            CameraPose {
                eye: lerp_vec3(pose.eye, leg.to.eye, t),
                target: lerp_vec3(pose.target, leg.to.target, t),
            }
        })
    }
}

/// Point on a sphere of `radius` above the given latitude/longitude, in the
/// same orientation the globe model uses (+Y north, longitude 0 facing +X
/// after the 180° offset).
pub fn lat_lon_to_vec3(lat_deg: f32, lon_deg: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + 180.0).to_radians();
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}
