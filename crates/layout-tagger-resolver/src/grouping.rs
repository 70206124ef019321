//! Connected-component grouping of overlapping regions.
//!
//! Two strategies produce the same partition: merging neighbour sets until
//! they are pairwise disjoint, and a union-find forest over the pairs. Both
//! return groups ordered by their smallest member.

use std::collections::{BTreeSet, VecDeque};

use layout_tagger_core::GroupingStrategy;
use rustc_hash::FxHashMap;

use crate::OverlapSet;

/// Indices of regions linked to each other through overlaps.
pub type Group = BTreeSet<usize>;

/// Group overlapping regions with the given strategy.
///
/// Only regions in at least one overlap pair appear in a group.
pub fn group_overlaps(overlaps: &OverlapSet, strategy: GroupingStrategy) -> Vec<Group> {
    match strategy {
        GroupingStrategy::NeighborMerge => merge_neighbor_sets(overlaps),
        GroupingStrategy::UnionFind => union_find_groups(overlaps),
    }
}

/// Seed a set per participating region and union intersecting sets.
///
/// Each seed is the region's closed neighbourhood (the region plus its direct
/// neighbours). A seed keeps absorbing every remaining set it intersects
/// until a full pass absorbs nothing new, so the surviving sets are pairwise
/// disjoint.
pub fn merge_neighbor_sets(overlaps: &OverlapSet) -> Vec<Group> {
    let mut pending: VecDeque<Group> = overlaps
        .participants()
        .map(|index| {
            let mut seed: Group = overlaps.neighbors(index).collect();
            seed.insert(index);
            seed
        })
        .collect();

    let mut groups = Vec::new();
    while let Some(mut current) = pending.pop_front() {
        loop {
            let before = current.len();
            pending.retain(|other| {
                if current.is_disjoint(other) {
                    true
                } else {
                    current.extend(other.iter().copied());
                    false
                }
            });
            if current.len() == before {
                break;
            }
        }
        groups.push(current);
    }

    groups
}

/// Group regions with a disjoint-set forest over the overlap pairs.
pub fn union_find_groups(overlaps: &OverlapSet) -> Vec<Group> {
    let elements: Vec<usize> = overlaps.participants().collect();
    let mut forest = UnionFind::new(&elements);

    for (a, b) in overlaps.pairs() {
        forest.union(a, b);
    }

    let mut groups: Vec<Group> = forest.groups().into_values().collect();
    groups.sort_by_key(|group| group.first().copied());
    groups
}

/// Disjoint-set forest keyed by region index.
struct UnionFind {
    parent: FxHashMap<usize, usize>,
    rank: FxHashMap<usize, usize>,
}

impl UnionFind {
    fn new(elements: &[usize]) -> Self {
        let parent = elements.iter().map(|&e| (e, e)).collect();
        let rank = elements.iter().map(|&e| (e, 0)).collect();
        Self { parent, rank }
    }

    /// Find root of element with path compression
    fn find(&mut self, x: usize) -> usize {
        let parent = self.parent[&x];
        if parent == x {
            return x;
        }
        let root = self.find(parent);
        self.parent.insert(x, root);
        root
    }

    /// Union two elements by rank
    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        let rank_x = self.rank[&root_x];
        let rank_y = self.rank[&root_y];

        match rank_x.cmp(&rank_y) {
            std::cmp::Ordering::Greater => {
                self.parent.insert(root_y, root_x);
            }
            std::cmp::Ordering::Less => {
                self.parent.insert(root_x, root_y);
            }
            std::cmp::Ordering::Equal => {
                self.parent.insert(root_y, root_x);
                self.rank.insert(root_x, rank_x + 1);
            }
        }
    }

    fn groups(&mut self) -> FxHashMap<usize, Group> {
        let mut groups: FxHashMap<usize, Group> = FxHashMap::default();

        let elements: Vec<usize> = self.parent.keys().copied().collect();
        for elem in elements {
            let root = self.find(elem);
            groups.entry(root).or_default().insert(elem);
        }

        groups
    }
}
