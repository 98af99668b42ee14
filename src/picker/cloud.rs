//! Point cloud picking: nearest projected point under the cursor

use glam::{DVec2, DVec3};

use super::PickSurface;
use crate::files::cloud::PointCloud;
use crate::render::camera::OrbitCamera;
use crate::render::style;

/// Pick surface for the cloud pane
///
/// Projects every cloud point through the pane's camera and returns the
/// stored full-precision coordinate of the point nearest the click, within
/// a screen-space radius. Near-coincident projections are resolved toward
/// the camera, like a ray cast would be.
pub struct CloudSurface<'a> {
    pub cloud: &'a PointCloud,
    pub camera: &'a OrbitCamera,
    pub pane_size: DVec2,
}

impl PickSurface for CloudSurface<'_> {
    fn pick(&self, screen: DVec2) -> Option<DVec3> {
        let mut best: Option<(f64, f32, DVec3)> = None;
        for &point in self.cloud.positions() {
            let Some((projected, depth)) = self.camera.project(point, self.pane_size) else {
                continue;
            };
            let distance = (projected - screen).length();
            if distance > style::cloud::PICK_RADIUS {
                continue;
            }
            let replace = match best {
                None => true,
                Some((best_distance, best_depth, _)) => {
                    if (distance - best_distance).abs() <= style::cloud::PICK_TIE_BREAK {
                        depth < best_depth
                    } else {
                        distance < best_distance
                    }
                }
            };
            if replace {
                best = Some((distance, depth, point));
            }
        }
        best.map(|(_, _, point)| point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const PANE: DVec2 = DVec2::new(800.0, 600.0);

    fn looking_down_z() -> OrbitCamera {
        OrbitCamera {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
        }
    }

    fn cloud_of(points: &[[f64; 3]]) -> PointCloud {
        let text: String = points
            .iter()
            .map(|p| format!("{} {} {}\n", p[0], p[1], p[2]))
            .collect();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cloud.xyz");
        std::fs::write(&path, text).unwrap();
        PointCloud::load(&path).unwrap()
    }

    #[test]
    fn picks_the_point_under_the_cursor() {
        let cloud = cloud_of(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        let camera = looking_down_z();
        let surface = CloudSurface {
            cloud: &cloud,
            camera: &camera,
            pane_size: PANE,
        };
        let (target_screen, _) = camera.project(DVec3::new(1.0, 0.0, 0.0), PANE).unwrap();
        assert_eq!(
            surface.pick(target_screen),
            Some(DVec3::new(1.0, 0.0, 0.0))
        );
    }

    #[test]
    fn coincident_projections_resolve_toward_the_camera() {
        // Both points sit on the view axis; the nearer one must win
        let cloud = cloud_of(&[[0.0, 0.0, -5.0], [0.0, 0.0, 0.0]]);
        let camera = looking_down_z();
        let surface = CloudSurface {
            cloud: &cloud,
            camera: &camera,
            pane_size: PANE,
        };
        assert_eq!(surface.pick(PANE * 0.5), Some(DVec3::ZERO));
    }

    #[test]
    fn empty_space_picks_nothing() {
        let cloud = cloud_of(&[[0.0, 0.0, 0.0]]);
        let camera = looking_down_z();
        let surface = CloudSurface {
            cloud: &cloud,
            camera: &camera,
            pane_size: PANE,
        };
        assert_eq!(surface.pick(DVec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn returns_the_stored_coordinate_not_a_reprojection() {
        let stored = [0.123456789012345, -7.5, 2.25];
        let cloud = cloud_of(&[stored]);
        let camera = looking_down_z();
        let surface = CloudSurface {
            cloud: &cloud,
            camera: &camera,
            pane_size: PANE,
        };
        let (screen, _) = camera
            .project(DVec3::from_array(stored), PANE)
            .unwrap();
        assert_eq!(surface.pick(screen), Some(DVec3::from_array(stored)));
    }
}
