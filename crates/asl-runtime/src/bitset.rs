//! Fixed-size bit arrays.

use std::fmt;

use smallvec::SmallVec;

const BITS_PER_WORD: usize = 64;

/// A fixed number of bits packed into 64-bit words.
///
/// Out-of-range bits read as unset, and mutating one is a no-op. Sets of
/// up to 128 bits are stored inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitset {
    words: SmallVec<[u64; 2]>,
    len: usize,
}

impl Bitset {
    /// Create a set of `len` bits, all unset.
    pub fn new(len: usize) -> Self {
        let words = len.div_ceil(BITS_PER_WORD);
        Self {
            words: SmallVec::from_elem(0, words),
            len,
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds zero bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes of word storage backing the set.
    pub fn byte_len(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    fn locate(bit: usize) -> (usize, u64) {
        (bit / BITS_PER_WORD, 1u64 << (bit % BITS_PER_WORD))
    }

    /// Whether `bit` is set. Always `false` past the end.
    pub fn get(&self, bit: usize) -> bool {
        if bit >= self.len {
            return false;
        }
        let (word, mask) = Self::locate(bit);
        self.words[word] & mask != 0
    }

    /// Set `bit`.
    pub fn set(&mut self, bit: usize) -> &mut Self {
        if bit < self.len {
            let (word, mask) = Self::locate(bit);
            self.words[word] |= mask;
        }
        self
    }

    /// Clear `bit`.
    pub fn unset(&mut self, bit: usize) -> &mut Self {
        if bit < self.len {
            let (word, mask) = Self::locate(bit);
            self.words[word] &= !mask;
        }
        self
    }

    /// Flip `bit`.
    pub fn toggle(&mut self, bit: usize) -> &mut Self {
        if bit < self.len {
            let (word, mask) = Self::locate(bit);
            self.words[word] ^= mask;
        }
        self
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of the set bits, ascending.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&bit| self.get(bit))
    }
}

/// Renders bits in index order as `0`/`1`, with a space after every
/// eighth bit that is not the last.
impl fmt::Display for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in 0..self.len {
            if bit > 0 && bit % 8 == 0 {
                f.write_str(" ")?;
            }
            f.write_str(if self.get(bit) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_is_all_unset() {
        let bs = Bitset::new(100);
        assert_eq!(bs.len(), 100);
        assert_eq!(bs.count_ones(), 0);
        assert_eq!(bs.byte_len(), 16);
    }

    #[test]
    fn set_unset_toggle() {
        let mut bs = Bitset::new(70);
        bs.set(0).set(64).set(69);
        assert!(bs.get(0) && bs.get(64) && bs.get(69));
        assert!(!bs.get(1));
        bs.unset(64).toggle(1).toggle(0);
        assert!(!bs.get(64));
        assert!(bs.get(1));
        assert!(!bs.get(0));
        assert_eq!(bs.iter_ones().collect::<Vec<_>>(), vec![1, 69]);
    }

    #[test]
    fn out_of_range_is_inert() {
        let mut bs = Bitset::new(8);
        let before = bs.clone();
        bs.set(8).toggle(100).unset(usize::MAX);
        assert_eq!(bs, before);
        assert!(!bs.get(8));
    }

    #[test]
    fn empty_set() {
        let bs = Bitset::new(0);
        assert!(bs.is_empty());
        assert_eq!(bs.byte_len(), 0);
        assert_eq!(bs.to_string(), "");
    }

    #[test]
    fn display_groups_by_eight() {
        let mut bs = Bitset::new(10);
        bs.set(0).set(7).set(9);
        assert_eq!(bs.to_string(), "10000001 01");
        assert_eq!(Bitset::new(16).to_string(), "00000000 00000000");
    }

    proptest! {
        #[test]
        fn toggle_twice_is_identity(len in 1usize..300, bit in 0usize..300) {
            let mut bs = Bitset::new(len);
            bs.set(len / 2);
            let before = bs.clone();
            bs.toggle(bit).toggle(bit);
            prop_assert_eq!(bs, before);
        }

        #[test]
        fn count_matches_distinct_sets(len in 1usize..300, bits in prop::collection::btree_set(0usize..300, 0..40)) {
            let mut bs = Bitset::new(len);
            for &b in &bits {
                bs.set(b);
            }
            prop_assert_eq!(bs.count_ones(), bits.iter().filter(|&&b| b < len).count());
        }
    }
}
