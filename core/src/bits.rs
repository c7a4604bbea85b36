//! Dense bit set addressed by row-major tile index.

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-capacity set of tile indices backed by 64-bit words.
///
/// Indices at or beyond the capacity are never members; inserting them is a
/// no-op that reports `false`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileBitSet {
    words: Vec<u64>,
    capacity: usize,
}

impl TileBitSet {
    /// Creates an empty set able to hold indices `0..capacity`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// Number of addressable indices.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reports whether the index is a member.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.capacity && self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Adds the index, returning `true` if it was not yet a member.
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let word = &mut self.words[index / WORD_BITS];
        let mask = 1 << (index % WORD_BITS);
        let added = *word & mask == 0;
        *word |= mask;
        added
    }

    /// Removes the index, returning `true` if it was a member.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.contains(index) {
            return false;
        }
        self.words[index / WORD_BITS] &= !(1 << (index % WORD_BITS));
        true
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Number of members.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::TileBitSet;

    #[test]
    fn insert_reports_new_members_only() {
        let mut bits = TileBitSet::with_capacity(130);
        assert!(bits.insert(0));
        assert!(bits.insert(129));
        assert!(!bits.insert(129));
        assert!(!bits.insert(130), "indices past capacity are rejected");
        assert!(bits.contains(129));
        assert!(!bits.contains(64));
        assert_eq!(bits.count(), 2);

        assert!(bits.remove(129));
        assert!(!bits.remove(129));
        assert!(!bits.remove(500));
        assert_eq!(bits.count(), 1);

        bits.clear();
        assert_eq!(bits.count(), 0);
        assert_eq!(bits.capacity(), 130);
    }
}
