//! Image viewport picking: the planar view transform and its pick surface

use glam::{DVec2, DVec3};

use super::PickSurface;

/// User-controlled view state for the image pane: zoom relative to the
/// fit-to-pane scale, plus a screen-space pan offset
///
/// The absolute mapping depends on the pane size, which is only known at
/// event/draw time, so the view resolves to a [`PlanarTransform`] on demand.
/// Draw and pick resolve against the same sizes and therefore always agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarView {
    pub zoom: f64,
    pub pan: DVec2,
}

impl Default for PlanarView {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: DVec2::ZERO,
        }
    }
}

impl PlanarView {
    /// Absolute transform for an image of `image_size` pixels shown in a pane
    /// of `pane_size` logical pixels. At zoom 1 with no pan the image is
    /// contained and centered, never upscaled.
    pub fn transform(&self, image_size: DVec2, pane_size: DVec2) -> PlanarTransform {
        let scale = fit_scale(image_size, pane_size) * self.zoom;
        let offset = (pane_size - image_size * scale) * 0.5 + self.pan;
        PlanarTransform { scale, offset }
    }

    /// Zoom by `factor`, keeping the image point under `screen` fixed
    pub fn zoom_about(&mut self, screen: DVec2, factor: f64, image_size: DVec2, pane_size: DVec2) {
        let fixed = self.transform(image_size, pane_size).to_world(screen);
        self.zoom = (self.zoom * factor).clamp(1.0e-2, 1.0e3);
        let scale = fit_scale(image_size, pane_size) * self.zoom;
        let centered = (pane_size - image_size * scale) * 0.5;
        self.pan = screen - fixed * scale - centered;
    }

    /// Translate the view by a screen-space delta
    pub fn pan_by(&mut self, delta: DVec2) {
        self.pan += delta;
    }
}

fn fit_scale(image_size: DVec2, pane_size: DVec2) -> f64 {
    (pane_size.x / image_size.x)
        .min(pane_size.y / image_size.y)
        .min(1.0)
        .max(f64::MIN_POSITIVE)
}

/// Resolved mapping between pane-local screen coordinates and image pixel
/// coordinates: `screen = world * scale + offset`. World coordinates are
/// image pixels, origin top-left, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarTransform {
    pub scale: f64,
    pub offset: DVec2,
}

impl PlanarTransform {
    pub fn to_screen(&self, world: DVec2) -> DVec2 {
        world * self.scale + self.offset
    }

    pub fn to_world(&self, screen: DVec2) -> DVec2 {
        (screen - self.offset) / self.scale
    }
}

/// Pick surface for the image pane
///
/// Picks always succeed with some coordinate, including positions outside the
/// image extent; callers decide whether a degenerate pick matters.
#[derive(Debug, Clone, Copy)]
pub struct ImagePlane {
    pub transform: PlanarTransform,
}

impl PickSurface for ImagePlane {
    fn pick(&self, screen: DVec2) -> Option<DVec3> {
        let p = self.transform.to_world(screen);
        Some(DVec3::new(p.x, p.y, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: DVec2 = DVec2::new(200.0, 100.0);
    const PANE: DVec2 = DVec2::new(100.0, 100.0);

    #[test]
    fn default_view_centers_and_contains() {
        let t = PlanarView::default().transform(IMAGE, PANE);
        assert_eq!(t.scale, 0.5);
        // 200x100 at half scale is 100x50, centered vertically
        assert_eq!(t.to_screen(DVec2::ZERO), DVec2::new(0.0, 25.0));
        assert_eq!(t.to_screen(IMAGE), DVec2::new(100.0, 75.0));
    }

    #[test]
    fn default_view_never_upscales() {
        let t = PlanarView::default().transform(DVec2::new(10.0, 10.0), DVec2::new(500.0, 500.0));
        assert_eq!(t.scale, 1.0);
    }

    #[test]
    fn screen_world_mapping_is_inverse() {
        let t = PlanarTransform {
            scale: 1.5,
            offset: DVec2::new(12.0, -3.0),
        };
        let screen = DVec2::new(40.0, 55.0);
        let there_and_back = t.to_screen(t.to_world(screen));
        assert!((there_and_back - screen).length() < 1e-9);
    }

    #[test]
    fn zoom_about_keeps_cursor_point_fixed() {
        let mut view = PlanarView::default();
        let cursor = DVec2::new(30.0, 70.0);
        let before = view.transform(IMAGE, PANE).to_world(cursor);
        view.zoom_about(cursor, 2.0, IMAGE, PANE);
        let after = view.transform(IMAGE, PANE).to_world(cursor);
        assert!((before - after).length() < 1e-9);
        assert_eq!(view.zoom, 2.0);
    }

    #[test]
    fn pan_moves_the_view_not_the_world() {
        let mut view = PlanarView::default();
        let world_before = view.transform(IMAGE, PANE).to_world(DVec2::new(50.0, 50.0));
        view.pan_by(DVec2::new(10.0, 0.0));
        let world_after = view.transform(IMAGE, PANE).to_world(DVec2::new(60.0, 50.0));
        assert!((world_before - world_after).length() < 1e-9);
    }

    #[test]
    fn image_plane_pick_always_returns_zero_z() {
        let plane = ImagePlane {
            transform: PlanarTransform {
                scale: 2.0,
                offset: DVec2::new(10.0, 10.0),
            },
        };
        // Outside the image extent still picks a coordinate
        let p = plane.pick(DVec2::new(0.0, 0.0)).unwrap();
        assert_eq!(p, DVec3::new(-5.0, -5.0, 0.0));
    }
}
