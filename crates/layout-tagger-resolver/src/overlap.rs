//! Pairwise overlap detection.

use std::collections::{BTreeMap, BTreeSet};

use layout_tagger_core::Region;
use tracing::debug;

/// Set of overlapping region pairs with a per-region neighbour index.
///
/// Pairs are stored as `(i, j)` with `i < j`; every pair is stored once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapSet {
    pairs: BTreeSet<(usize, usize)>,
    neighbors: BTreeMap<usize, BTreeSet<usize>>,
}

impl OverlapSet {
    /// Create an empty overlap set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Test every unordered pair of regions and collect the overlapping ones.
    pub fn find(regions: &[Region]) -> Self {
        let mut set = Self::new();

        for (i, first) in regions.iter().enumerate() {
            for (j, second) in regions.iter().enumerate().skip(i + 1) {
                if first.bbox.overlaps(&second.bbox) {
                    let (cover_first, cover_second) = first.bbox.coverage(&second.bbox);
                    debug!(
                        "Overlap: ({} {}%, {} {}%) covering {:.1}% / {:.1}%",
                        first.label,
                        first.score_percent(),
                        second.label,
                        second.score_percent(),
                        cover_first,
                        cover_second
                    );
                    set.insert(i, j);
                }
            }
        }

        set
    }

    /// Build a set from explicit index pairs.
    ///
    /// Pairs are normalized so the smaller index comes first; self pairs are
    /// ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut set = Self::new();
        for (a, b) in pairs {
            set.insert(a, b);
        }
        set
    }

    /// Record that regions `a` and `b` overlap.
    pub fn insert(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let pair = (a.min(b), a.max(b));
        if self.pairs.insert(pair) {
            self.neighbors.entry(a).or_default().insert(b);
            self.neighbors.entry(b).or_default().insert(a);
        }
    }

    /// Whether `a` and `b` overlap directly (one hop).
    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.pairs.contains(&(a.min(b), a.max(b)))
    }

    /// Direct neighbours of a region (empty for regions without overlaps).
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors
            .get(&index)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Regions taking part in at least one overlap, ascending.
    pub fn participants(&self) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.keys().copied()
    }

    /// Whether a region takes part in at least one overlap.
    pub fn is_participant(&self, index: usize) -> bool {
        self.neighbors.contains_key(&index)
    }

    /// All pairs in ascending order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }

    /// Number of overlapping pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair overlaps.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
