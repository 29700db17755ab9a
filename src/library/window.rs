use bitvec::prelude::*;
use std::collections::VecDeque;

/// Anti-repetition window over recently placed tiles
///
/// Keeps the last `capacity` tile indices in placement order together with a
/// membership bitset sized to the library, giving O(1) exclusion checks
/// during nearest-tile lookup. A capacity of zero never excludes anything.
#[derive(Clone, Debug)]
pub struct UsageWindow {
    recent: VecDeque<usize>,
    members: BitVec,
    capacity: usize,
}

impl UsageWindow {
    /// Create an empty window for a library of `tile_count` tiles
    pub fn new(capacity: usize, tile_count: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity),
            members: bitvec![0; tile_count],
            capacity,
        }
    }

    /// Record a placed tile, evicting the oldest entry when full
    pub fn push(&mut self, tile: usize) {
        if self.capacity == 0 || tile >= self.members.len() {
            return;
        }

        if self.recent.len() == self.capacity {
            if let Some(evicted) = self.recent.pop_front() {
                // The same tile may still be in the window from a later placement
                if !self.recent.contains(&evicted) {
                    self.members.set(evicted, false);
                }
            }
        }

        self.recent.push_back(tile);
        self.members.set(tile, true);
    }

    /// Test whether a tile is currently excluded
    pub fn contains(&self, tile: usize) -> bool {
        self.members.get(tile).as_deref() == Some(&true)
    }

    /// Number of distinct tiles currently excluded
    pub fn excluded_count(&self) -> usize {
        self.members.count_ones()
    }

    /// Whether every tile of the library is excluded
    pub fn excludes_all(&self) -> bool {
        !self.members.is_empty() && self.members.all()
    }

    /// Maximum number of remembered placements
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Recently placed tiles, oldest first
    pub fn recent(&self) -> impl Iterator<Item = usize> + '_ {
        self.recent.iter().copied()
    }

    /// Forget every placement
    pub fn clear(&mut self) {
        self.recent.clear();
        self.members.fill(false);
    }
}
