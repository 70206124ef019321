//! Greedy conflict resolution within overlap groups.
//!
//! Each group is processed in rounds: the highest-scoring remaining region is
//! kept, its direct overlap neighbours are dropped, and everything else goes
//! to the next round. Like greedy non-max suppression this does not promise a
//! pairwise non-overlapping result: two regions linked only through a dropped
//! region can both survive.

use std::collections::BTreeSet;

use layout_tagger_core::{GroupingStrategy, Region};
use tracing::debug;

use crate::grouping::{group_overlaps, Group};
use crate::OverlapSet;

/// Indices to drop from one group.
///
/// Ties on the highest score go to the lowest region index: members are
/// scanned in ascending order and only a strictly greater score replaces the
/// current pick.
pub fn resolve_group(group: &Group, overlaps: &OverlapSet, regions: &[Region]) -> BTreeSet<usize> {
    let mut removed = BTreeSet::new();
    let mut working = group.clone();

    while let Some(best) = highest_scoring(&working, regions) {
        let mut next_round = Group::new();
        for &member in &working {
            if member == best {
                continue;
            }
            if overlaps.contains(best, member) {
                removed.insert(member);
            } else {
                next_round.insert(member);
            }
        }
        working = next_round;
    }

    removed
}

fn highest_scoring(working: &Group, regions: &[Region]) -> Option<usize> {
    let mut members = working.iter().copied();
    let mut best = members.next()?;
    for member in members {
        if regions[member].score > regions[best].score {
            best = member;
        }
    }
    Some(best)
}

/// Outcome of resolving one page's regions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Every overlapping pair
    pub overlaps: OverlapSet,
    /// Connected groups of overlapping regions
    pub groups: Vec<Group>,
    /// Indices dropped across all groups
    pub removed: BTreeSet<usize>,
}

impl Resolution {
    /// Whether the region at `index` survived.
    pub fn is_kept(&self, index: usize) -> bool {
        !self.removed.contains(&index)
    }

    /// Indices of surviving regions out of `len`, in original order.
    pub fn kept_indices(&self, len: usize) -> Vec<usize> {
        (0..len).filter(|&i| self.is_kept(i)).collect()
    }
}

/// Resolves overlapping detections on a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictResolver {
    grouping: GroupingStrategy,
}

impl ConflictResolver {
    /// Create a resolver using neighbour-set merging for grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with a specific grouping strategy.
    pub fn with_strategy(grouping: GroupingStrategy) -> Self {
        Self { grouping }
    }

    /// Grouping strategy in use.
    pub fn strategy(&self) -> GroupingStrategy {
        self.grouping
    }

    /// Find overlaps, group them and pick the regions to drop.
    pub fn resolve(&self, regions: &[Region]) -> Resolution {
        let overlaps = OverlapSet::find(regions);
        let groups = group_overlaps(&overlaps, self.grouping);

        debug!("Found {} groups", groups.len());
        for group in &groups {
            for &member in group {
                let region = &regions[member];
                debug!(
                    "Group member: {} {}% {:?}",
                    region.label,
                    region.score_percent(),
                    <[f64; 4]>::from(region.bbox)
                );
            }
        }

        let mut removed = BTreeSet::new();
        for group in &groups {
            let dropped = resolve_group(group, &overlaps, regions);
            for &index in &dropped {
                let region = &regions[index];
                debug!("Removing: {} {}%", region.label, region.score_percent());
            }
            removed.extend(dropped);
        }

        Resolution {
            overlaps,
            groups,
            removed,
        }
    }

    /// Surviving regions in their original order.
    pub fn resolve_regions(&self, regions: &[Region]) -> Vec<Region> {
        let resolution = self.resolve(regions);
        regions
            .iter()
            .enumerate()
            .filter(|(index, _)| resolution.is_kept(*index))
            .map(|(_, region)| region.clone())
            .collect()
    }
}
