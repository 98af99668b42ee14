//! Keypoint picking decoupled from the rendering toolkit
//!
//! Each viewport owns a [`PickController`] holding its ordered keypoint list.
//! The widget layer reports primary clicks; the controller asks an injected
//! [`PickSurface`] to resolve the screen position into a world coordinate and
//! appends a keypoint on success. Surfaces carry the viewport's current view
//! transform, so nothing here reaches into renderer state ambiently.

pub mod cloud;
pub mod image;

use glam::{DVec2, DVec3};

use crate::domain::{Keypoint, KeypointList};

/// Resolves a screen position into a world coordinate
pub trait PickSurface {
    /// World coordinate under `screen`, or `None` when nothing is there
    fn pick(&self, screen: DVec2) -> Option<DVec3>;
}

/// Whether a primary click qualifies as a pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickGate {
    /// Every primary click picks
    #[default]
    Always,
    /// Only clicks with Ctrl held pick; plain clicks are camera interaction
    WithCtrl,
}

impl PickGate {
    fn admits(self, ctrl_held: bool) -> bool {
        match self {
            PickGate::Always => true,
            PickGate::WithCtrl => ctrl_held,
        }
    }
}

/// Turns qualifying primary clicks into keypoints and owns the list
#[derive(Debug, Clone, Default)]
pub struct PickController {
    keypoints: KeypointList,
    gate: PickGate,
    snap_markers: bool,
}

impl PickController {
    /// Controller for the image viewport: ungated picks, markers snapped to
    /// the nearest integer pixel (cosmetic only)
    pub fn image() -> Self {
        Self {
            keypoints: KeypointList::new(),
            gate: PickGate::Always,
            snap_markers: true,
        }
    }

    /// Controller for the cloud viewport: configurable gate, markers sit on
    /// the picked point
    pub fn cloud(gate: PickGate) -> Self {
        Self {
            keypoints: KeypointList::new(),
            gate,
            snap_markers: false,
        }
    }

    /// Handle a primary click. Returns the new keypoint's 1-based label when
    /// a keypoint was added.
    pub fn primary_click(
        &mut self,
        surface: &dyn PickSurface,
        screen: DVec2,
        ctrl_held: bool,
    ) -> Option<usize> {
        if !self.gate.admits(ctrl_held) {
            return None;
        }
        let Some(world) = surface.pick(screen) else {
            log::debug!("pick at {screen:?} hit nothing");
            return None;
        };
        Some(self.keypoints.push(self.make_keypoint(world)))
    }

    /// Remove the most recent keypoint; `None` on an empty list
    pub fn remove_last(&mut self) -> Option<Keypoint> {
        self.keypoints.remove_last()
    }

    /// Remove every keypoint
    pub fn remove_all(&mut self) {
        self.keypoints.remove_all();
    }

    /// Replace the list with coordinates loaded from a file, in file order
    pub fn replace_all(&mut self, coords: Vec<DVec3>) {
        let points = coords.into_iter().map(|c| self.make_keypoint(c)).collect();
        self.keypoints.replace_all(points);
    }

    pub fn keypoints(&self) -> &KeypointList {
        &self.keypoints
    }

    fn make_keypoint(&self, world: DVec3) -> Keypoint {
        if self.snap_markers {
            Keypoint::snapped(world)
        } else {
            Keypoint::at(world)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface returning a fixed sequence of canned coordinates
    struct FakeSurface {
        results: Vec<Option<DVec3>>,
        calls: std::cell::Cell<usize>,
    }

    impl FakeSurface {
        fn new(results: Vec<Option<DVec3>>) -> Self {
            Self {
                results,
                calls: std::cell::Cell::new(0),
            }
        }
    }

    impl PickSurface for FakeSurface {
        fn pick(&self, _screen: DVec2) -> Option<DVec3> {
            let i = self.calls.get();
            self.calls.set(i + 1);
            self.results[i]
        }
    }

    #[test]
    fn clicks_append_surface_coordinates_in_order() {
        let picks = vec![
            Some(DVec3::new(1.0, 2.0, 3.0)),
            Some(DVec3::new(4.0, 5.0, 6.0)),
        ];
        let surface = FakeSurface::new(picks.clone());
        let mut ctl = PickController::cloud(PickGate::Always);
        assert_eq!(ctl.primary_click(&surface, DVec2::ZERO, false), Some(1));
        assert_eq!(ctl.primary_click(&surface, DVec2::ZERO, false), Some(2));
        let stored: Vec<_> = ctl.keypoints().positions().collect();
        assert_eq!(stored, vec![picks[0].unwrap(), picks[1].unwrap()]);
    }

    #[test]
    fn gated_controller_ignores_plain_clicks() {
        let surface = FakeSurface::new(vec![Some(DVec3::ONE)]);
        let mut ctl = PickController::cloud(PickGate::WithCtrl);
        assert_eq!(ctl.primary_click(&surface, DVec2::ZERO, false), None);
        assert!(ctl.keypoints().is_empty());
        // The surface is only consulted for qualifying clicks
        assert_eq!(surface.calls.get(), 0);
        assert_eq!(ctl.primary_click(&surface, DVec2::ZERO, true), Some(1));
    }

    #[test]
    fn empty_pick_adds_nothing() {
        let surface = FakeSurface::new(vec![None, Some(DVec3::ONE)]);
        let mut ctl = PickController::cloud(PickGate::Always);
        assert_eq!(ctl.primary_click(&surface, DVec2::ZERO, false), None);
        assert!(ctl.keypoints().is_empty());
        assert_eq!(ctl.primary_click(&surface, DVec2::ZERO, false), Some(1));
    }

    #[test]
    fn image_controller_snaps_markers_only() {
        let surface = FakeSurface::new(vec![Some(DVec3::new(10.6, 20.2, 0.0))]);
        let mut ctl = PickController::image();
        ctl.primary_click(&surface, DVec2::ZERO, false);
        let kp = *ctl.keypoints().iter().next().unwrap();
        assert_eq!(kp.world, DVec3::new(10.6, 20.2, 0.0));
        assert_eq!(kp.anchor, DVec3::new(11.0, 20.0, 0.0));
    }

    #[test]
    fn replace_all_applies_marker_policy() {
        let mut ctl = PickController::image();
        ctl.replace_all(vec![DVec3::new(0.4, 0.6, 0.0)]);
        let kp = *ctl.keypoints().iter().next().unwrap();
        assert_eq!(kp.anchor, DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(kp.world, DVec3::new(0.4, 0.6, 0.0));
    }

    #[test]
    fn remove_last_is_safe_on_empty() {
        let mut ctl = PickController::image();
        assert!(ctl.remove_last().is_none());
        ctl.remove_all();
        assert!(ctl.keypoints().is_empty());
    }
}
