//! Keypoint records and the ordered keypoint list
//!
//! A keypoint couples the full-precision picked coordinate with the anchor
//! its marker is drawn at, so the marker can never desync from the
//! coordinate it labels. Display labels are 1-based list positions.

use glam::DVec3;

/// A user-selected landmark coordinate in one viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keypoint {
    /// Picked coordinate in the viewport's world space (image picks carry z = 0)
    pub world: DVec3,
    /// Marker placement; equals `world` unless the owning picker snaps markers
    pub anchor: DVec3,
}

impl Keypoint {
    /// Keypoint whose marker sits exactly on the picked coordinate
    pub fn at(world: DVec3) -> Self {
        Self {
            world,
            anchor: world,
        }
    }

    /// Keypoint with the marker snapped to the nearest integer position.
    /// Snapping affects only the anchor; the stored coordinate keeps full
    /// precision.
    pub fn snapped(world: DVec3) -> Self {
        Self {
            world,
            anchor: world.round(),
        }
    }
}

/// Ordered sequence of keypoints; insertion order is display and save order
#[derive(Clone, Debug, Default)]
pub struct KeypointList {
    points: Vec<Keypoint>,
}

impl KeypointList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a keypoint and return its 1-based display label
    pub fn push(&mut self, point: Keypoint) -> usize {
        self.points.push(point);
        self.points.len()
    }

    /// Remove the most recent keypoint. Returns `None` on an empty list
    /// instead of panicking.
    pub fn remove_last(&mut self) -> Option<Keypoint> {
        self.points.pop()
    }

    /// Remove every keypoint
    pub fn remove_all(&mut self) {
        self.points.clear();
    }

    /// Replace the whole list with `points`, preserving their order
    pub fn replace_all(&mut self, points: Vec<Keypoint>) {
        self.points = points;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keypoint> {
        self.points.iter()
    }

    /// Stored coordinates in list order
    pub fn positions(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.points.iter().map(|p| p.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_pick_order_and_labels() {
        let mut list = KeypointList::new();
        let a = Keypoint::at(DVec3::new(1.0, 2.0, 0.0));
        let b = Keypoint::at(DVec3::new(3.4, 5.6, 0.0));
        assert_eq!(list.push(a), 1);
        assert_eq!(list.push(b), 2);
        assert_eq!(list.len(), 2);
        let stored: Vec<_> = list.positions().collect();
        assert_eq!(stored, vec![a.world, b.world]);
    }

    #[test]
    fn remove_last_keeps_prefix_in_order() {
        let mut list = KeypointList::new();
        let picks: Vec<_> = (0..5)
            .map(|i| Keypoint::at(DVec3::new(i as f64, i as f64 * 2.0, 0.0)))
            .collect();
        for p in &picks {
            list.push(*p);
        }
        assert_eq!(list.remove_last().unwrap(), picks[4]);
        assert_eq!(list.remove_last().unwrap(), picks[3]);
        assert_eq!(list.len(), 3);
        let stored: Vec<_> = list.iter().copied().collect();
        assert_eq!(stored, picks[..3]);
    }

    #[test]
    fn remove_last_on_empty_is_a_noop() {
        let mut list = KeypointList::new();
        assert!(list.remove_last().is_none());
        list.push(Keypoint::at(DVec3::ZERO));
        list.remove_last();
        assert!(list.remove_last().is_none());
    }

    #[test]
    fn remove_all_empties_any_length() {
        for n in [0usize, 1, 7] {
            let mut list = KeypointList::new();
            for i in 0..n {
                list.push(Keypoint::at(DVec3::splat(i as f64)));
            }
            list.remove_all();
            assert!(list.is_empty());
        }
    }

    #[test]
    fn snapping_rounds_anchor_but_not_world() {
        let p = Keypoint::snapped(DVec3::new(12.7, 3.2, 0.0));
        assert_eq!(p.anchor, DVec3::new(13.0, 3.0, 0.0));
        assert_eq!(p.world, DVec3::new(12.7, 3.2, 0.0));
    }
}
