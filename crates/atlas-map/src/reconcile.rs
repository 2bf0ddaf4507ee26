//! Marker set reconciliation
//!
//! Computes the smallest set of surface commands that turns the markers
//! currently on the map into the markers the profile collection calls for.

use crate::marker::Marker;
use crate::surface::{MapSurface, SurfaceCommand};
use atlas_profile::{Profile, ProfileId};
use std::collections::BTreeMap;

/// Markers currently placed, keyed by profile
pub type MarkerSet = BTreeMap<ProfileId, Marker>;

/// Difference between the placed markers and the desired ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerDiff {
    /// New markers, in collection order
    pub added: Vec<Marker>,
    /// Markers whose profile is gone or no longer plottable
    pub removed: Vec<ProfileId>,
    /// Markers whose position changed
    pub moved: Vec<Marker>,
    /// Markers whose popup text changed
    pub relabeled: Vec<Marker>,
}

impl MarkerDiff {
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.moved.is_empty()
            && self.relabeled.is_empty()
    }

    /// Surface commands realizing this diff: removals first, then additions,
    /// moves and popup updates
    #[must_use]
    pub fn commands(&self) -> Vec<SurfaceCommand> {
        let mut out = Vec::with_capacity(
            self.added.len() + self.removed.len() + self.moved.len() + self.relabeled.len(),
        );
        out.extend(self.removed.iter().cloned().map(SurfaceCommand::RemoveMarker));
        out.extend(self.added.iter().cloned().map(SurfaceCommand::AddMarker));
        out.extend(
            self.moved
                .iter()
                .map(|m| SurfaceCommand::MoveMarker(m.profile_id.clone(), m.position)),
        );
        out.extend(
            self.relabeled
                .iter()
                .map(|m| SurfaceCommand::SetPopup(m.profile_id.clone(), m.popup.clone())),
        );
        out
    }

    /// Issue the diff to a surface and update the placed set to match
    pub fn apply(self, markers: &mut MarkerSet, surface: &mut dyn MapSurface) {
        for command in self.commands() {
            surface.apply(&command);
        }
        for id in self.removed {
            markers.remove(&id);
        }
        for marker in self.added.into_iter().chain(self.moved).chain(self.relabeled) {
            markers.insert(marker.profile_id.clone(), marker);
        }
    }
}

/// Desired markers for a profile collection
#[must_use]
pub fn desired_markers(profiles: &[Profile]) -> MarkerSet {
    profiles
        .iter()
        .filter_map(Marker::for_profile)
        .map(|m| (m.profile_id.clone(), m))
        .collect()
}

/// Diff the placed markers against a profile collection
#[must_use]
pub fn reconcile(current: &MarkerSet, profiles: &[Profile]) -> MarkerDiff {
    let mut diff = MarkerDiff::default();
    let mut wanted: BTreeMap<&ProfileId, Marker> = BTreeMap::new();

    for profile in profiles {
        let Some(marker) = Marker::for_profile(profile) else {
            continue;
        };
        // first occurrence wins, matching the registry's id uniqueness
        if wanted.contains_key(&profile.id) {
            continue;
        }
        match current.get(&profile.id) {
            None => diff.added.push(marker.clone()),
            Some(placed) => {
                if placed.position != marker.position {
                    diff.moved.push(marker.clone());
                }
                if placed.popup != marker.popup {
                    diff.relabeled.push(marker.clone());
                }
            }
        }
        wanted.insert(&profile.id, marker);
    }

    diff.removed = current
        .keys()
        .filter(|id| !wanted.contains_key(id))
        .cloned()
        .collect();
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;

    fn chicago() -> Profile {
        Profile::new("3", "Alex")
            .with_address("Chicago, IL")
            .with_location(41.8781, -87.6298)
    }

    #[test]
    fn empty_to_full() {
        let diff = reconcile(&MarkerSet::new(), &[chicago(), Profile::new("4", "nowhere")]);
        assert_eq!(diff.added.len(), 1);
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn unchanged_collection_is_a_no_op() {
        let profiles = vec![chicago()];
        let current = desired_markers(&profiles);
        assert!(reconcile(&current, &profiles).is_empty());
    }

    #[test]
    fn moves_and_relabels_are_separate() {
        let current = desired_markers(&[chicago()]);

        let moved = chicago().with_location(40.0, -80.0);
        let diff = reconcile(&current, &[moved]);
        assert_eq!(diff.moved.len(), 1);
        assert!(diff.relabeled.is_empty());

        let mut renamed = chicago();
        renamed.name = "Alexandra".into();
        let diff = reconcile(&current, &[renamed]);
        assert!(diff.moved.is_empty());
        assert_eq!(diff.relabeled.len(), 1);
    }

    #[test]
    fn losing_location_removes_marker() {
        let mut current = desired_markers(&[chicago()]);
        let mut unplotted = chicago();
        unplotted.location = None;

        let diff = reconcile(&current, &[unplotted]);
        assert_eq!(diff.removed, vec![ProfileId::from("3")]);

        diff.apply(&mut current, &mut HeadlessSurface);
        assert!(current.is_empty());
    }

    #[test]
    fn removals_are_issued_first() {
        let current = desired_markers(&[chicago()]);
        let other = Profile::new("5", "b").with_location(1.0, 1.0);
        let commands = reconcile(&current, &[other]).commands();
        assert!(matches!(commands[0], SurfaceCommand::RemoveMarker(_)));
        assert!(matches!(commands[1], SurfaceCommand::AddMarker(_)));
    }
}
