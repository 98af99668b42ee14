//! Orbit camera for the point cloud viewport
//!
//! Yaw/pitch/distance around a focal target, projected with a fixed vertical
//! field of view. Screen coordinates are pane-local logical pixels, origin
//! top-left, y down.

use glam::{DVec2, DVec3, Vec3};

/// Vertical field of view in radians
const FOV_Y: f32 = 0.6;
/// Points closer than this to the eye plane are culled
const NEAR: f32 = 1.0e-3;
/// Radians of rotation per dragged pixel
const ORBIT_SPEED: f32 = 0.008;
/// Pitch limit keeping the camera off the poles
const PITCH_LIMIT: f32 = 1.54;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
        }
    }
}

impl OrbitCamera {
    /// Camera looking at the center of an axis-aligned bounding box from a
    /// slightly oblique angle, far enough back that the whole box is visible
    pub fn fit(min: Vec3, max: Vec3) -> Self {
        let target = (min + max) * 0.5;
        let radius = ((max - min).length() * 0.5).max(NEAR);
        Self {
            target,
            yaw: 0.5,
            pitch: 0.35,
            distance: radius / (FOV_Y * 0.5).tan() * 1.2,
        }
    }

    fn direction(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * sy, sp, cp * cy)
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.direction() * self.distance
    }

    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = -self.direction();
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);
        (forward, right, up)
    }

    /// Project a world point into pane-local screen coordinates.
    /// Returns the screen position and the view depth, or `None` for points
    /// behind the eye.
    pub fn project(&self, point: DVec3, pane_size: DVec2) -> Option<(DVec2, f32)> {
        let (forward, right, up) = self.basis();
        let d = point.as_vec3() - self.eye();
        let z = d.dot(forward);
        if z < NEAR {
            return None;
        }
        let focal = 0.5 * pane_size.y as f32 / (FOV_Y * 0.5).tan();
        let x = d.dot(right) * focal / z;
        let y = d.dot(up) * focal / z;
        let center = pane_size * 0.5;
        Some((
            DVec2::new(center.x + x as f64, center.y - y as f64),
            z,
        ))
    }

    /// Rotate around the target by a screen-space drag delta
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * ORBIT_SPEED;
        self.pitch = (self.pitch + dy * ORBIT_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Slide the target in the view plane by a screen-space drag delta
    pub fn pan(&mut self, dx: f32, dy: f32, pane_size: DVec2) {
        let (_, right, up) = self.basis();
        let world_per_pixel = 2.0 * self.distance * (FOV_Y * 0.5).tan() / pane_size.y as f32;
        self.target -= right * dx * world_per_pixel;
        self.target += up * dy * world_per_pixel;
    }

    /// Move toward (factor < 1) or away from (factor > 1) the target
    pub fn dolly(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(1.0e-2, 1.0e6);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANE: DVec2 = DVec2::new(800.0, 600.0);

    #[test]
    fn target_projects_to_pane_center() {
        let cam = OrbitCamera::fit(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
        let (screen, depth) = cam.project(DVec3::ZERO, PANE).unwrap();
        assert!((screen - PANE * 0.5).length() < 1e-3);
        assert!((depth - cam.distance).abs() < 1e-3);
    }

    #[test]
    fn fit_keeps_box_corners_inside_the_pane() {
        let (min, max) = (Vec3::new(-3.0, -2.0, -5.0), Vec3::new(4.0, 1.0, 2.0));
        let cam = OrbitCamera::fit(min, max);
        for corner in [
            min,
            max,
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, min.y, max.z),
        ] {
            let (screen, _) = cam.project(corner.as_dvec3(), PANE).unwrap();
            assert!(screen.x >= 0.0 && screen.x <= PANE.x, "{screen:?}");
            assert!(screen.y >= 0.0 && screen.y <= PANE.y, "{screen:?}");
        }
    }

    #[test]
    fn points_behind_the_eye_are_culled() {
        let cam = OrbitCamera {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 5.0,
        };
        // The eye sits at +Z; anything farther along +Z is behind it
        assert!(cam.project(DVec3::new(0.0, 0.0, 20.0), PANE).is_none());
    }

    #[test]
    fn orbit_clamps_pitch() {
        let mut cam = OrbitCamera::default();
        cam.orbit(0.0, 1.0e6);
        assert!(cam.pitch <= PITCH_LIMIT);
        cam.orbit(0.0, -1.0e6);
        assert!(cam.pitch >= -PITCH_LIMIT);
    }

    #[test]
    fn dolly_scales_distance_within_limits() {
        let mut cam = OrbitCamera::default();
        cam.dolly(0.5);
        assert!((cam.distance - 5.0).abs() < 1e-6);
        cam.dolly(1.0e-9);
        assert!(cam.distance >= 1.0e-2);
    }
}
