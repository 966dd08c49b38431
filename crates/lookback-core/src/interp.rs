use glam::Vec3;
use std::ops::{Add, Mul, Sub};

/// Exact linear interpolation between two points, no smoothing.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// A value that chases a target by a fixed fraction of the gap every frame.
///
/// `current += (target - current) * factor`. Convergence speed depends on
/// frame rate and there is no "done" signal; the value simply gets close.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed<T> {
    current: T,
    factor: f32,
}

impl<T> Smoothed<T>
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    pub fn new(initial: T, factor: f32) -> Self {
        Self {
            current: initial,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    /// Advance one frame toward `target` and return the new value.
    #[inline]
    pub fn step(&mut self, target: T) -> T {
        self.current = self.current + (target - self.current) * self.factor;
        self.current
    }

    #[inline]
    pub fn value(&self) -> T {
        self.current
    }

    pub fn snap(&mut self, value: T) {
        self.current = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_moves_a_fixed_fraction_per_frame() {
        let mut s = Smoothed::new(0.0_f32, 0.1);
        assert!((s.step(1.0) - 0.1).abs() < 1e-6);
        assert!((s.step(1.0) - 0.19).abs() < 1e-6);
    }

    #[test]
    fn smoothing_converges_without_overshoot() {
        let mut s = Smoothed::new(Vec3::ZERO, 0.1);
        let target = Vec3::new(2.0, -1.0, 0.5);
        let mut prev_gap = f32::MAX;
        for _ in 0..200 {
            let gap = (target - s.step(target)).length();
            assert!(gap <= prev_gap);
            prev_gap = gap;
        }
        assert!(prev_gap < 1e-3);
    }

    #[test]
    fn factor_is_clamped() {
        let mut s = Smoothed::new(0.0_f32, 4.0);
        assert_eq!(s.step(3.0), 3.0);
    }
}
