//! Sorted population of candidate tours.
//!
//! The population is kept permanently sorted by ascending cost: every
//! insertion locates its slot with a binary search instead of re-sorting
//! the whole vector each generation. Locate is O(log n), the shift is
//! O(n), which beats an O(n log n) re-sort per generation.

/// A candidate tour: a permutation of `0..vertex_count`.
pub type Tour = Vec<usize>;

/// A tour together with its validated total cost.
///
/// A cost is only ever attached to a tour that passed
/// [`evaluate`](crate::ga::evaluate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationEntry {
    /// The tour itself.
    pub tour: Tour,
    /// Sum of all edge costs along the tour, wrap edge included.
    pub cost: u32,
}

/// Cost-ordered collection of unique tours.
#[derive(Debug, Clone, Default)]
pub struct Population {
    entries: Vec<PopulationEntry>,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no tour has been admitted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when some entry's tour is elementwise equal to `tour`.
    ///
    /// Used to reject duplicate genomes; diversity preservation, not a
    /// correctness requirement.
    pub fn contains(&self, tour: &[usize]) -> bool {
        self.entries.iter().any(|entry| entry.tour == tour)
    }

    /// Inserts `tour` at its cost-ordered position.
    ///
    /// On an exact cost match the new entry lands at the matched index,
    /// before the equal-cost entry found by the search.
    pub fn insert_sorted(&mut self, tour: Tour, cost: u32) {
        let mut lo = 0;
        let mut hi = self.entries.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match cost.cmp(&self.entries[mid].cost) {
                std::cmp::Ordering::Equal => {
                    self.entries.insert(mid, PopulationEntry { tour, cost });
                    return;
                }
                std::cmp::Ordering::Greater => lo = mid + 1,
                std::cmp::Ordering::Less => hi = mid,
            }
        }
        self.entries.insert(lo, PopulationEntry { tour, cost });
    }

    /// Removes the highest-cost entry (the tail of the sorted sequence).
    pub fn remove_worst(&mut self) -> Option<PopulationEntry> {
        self.entries.pop()
    }

    /// Removes worst entries until the population fits `target`.
    pub fn trim_to_target(&mut self, target: usize) {
        while self.entries.len() > target {
            self.entries.pop();
        }
    }

    /// The lowest-cost entry, or `None` when empty.
    pub fn best(&self) -> Option<&PopulationEntry> {
        self.entries.first()
    }

    /// Entry at `index` (sorted order).
    pub fn get(&self, index: usize) -> Option<&PopulationEntry> {
        self.entries.get(index)
    }

    /// Iterates entries in ascending cost order.
    pub fn iter(&self) -> impl Iterator<Item = &PopulationEntry> {
        self.entries.iter()
    }

    /// Whether costs are ascending; holds by construction after every
    /// public mutating call.
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].cost <= w[1].cost)
    }
}
