//! Fixed-length bit vectors sized to a graph order.
//!
//! [`Bits`] wraps [`fixedbitset::FixedBitSet`] and adds the scan operations
//! the traversal and set algorithms need: lowest-set-bit-from, callback
//! iteration with a stop flag, and conversion to node lists. A `Bits` value
//! always has one bit per node of the graph it was created for; operations
//! combining two of them require equal lengths.

use fixedbitset::FixedBitSet;

use crate::{NI, NONE};

const BLOCK_BITS: usize = 32;

/// A bit vector with one bit per node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bits(FixedBitSet);

impl Bits {
    /// Create a zeroed bit vector of `order` bits.
    pub fn with_order(order: usize) -> Self {
        Bits(FixedBitSet::with_capacity(order))
    }

    /// Number of bits.
    #[inline]
    pub fn order(&self) -> usize {
        self.0.len()
    }

    /// Test bit `n`.
    #[inline]
    pub fn bit(&self, n: NI) -> bool {
        self.0.contains(n as usize)
    }

    /// Set bit `n` to one.
    #[inline]
    pub fn set(&mut self, n: NI) {
        self.0.insert(n as usize);
    }

    /// Set bit `n` to one, returning whether it was already set.
    #[inline]
    pub fn put(&mut self, n: NI) -> bool {
        self.0.put(n as usize)
    }

    /// Clear bit `n`.
    #[inline]
    pub fn clear(&mut self, n: NI) {
        self.0.set(n as usize, false);
    }

    /// Flip bit `n`.
    #[inline]
    pub fn flip(&mut self, n: NI) {
        self.0.toggle(n as usize);
    }

    /// Set all bits to one.
    pub fn set_all(&mut self) {
        self.0.set_range(.., true);
    }

    /// Set all bits to zero.
    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    /// Number of one bits.
    pub fn count(&self) -> usize {
        self.0.count_ones(..)
    }

    /// `true` if no bit is set.
    pub fn is_zero(&self) -> bool {
        self.0.as_slice().iter().all(|&block| block == 0)
    }

    /// Lowest set bit at position `from` or above, or [`NONE`].
    pub fn one_from(&self, from: NI) -> NI {
        let order = self.0.len();
        let start = from.max(0) as usize;
        if start >= order {
            return NONE;
        }
        let blocks = self.0.as_slice();
        let first = blocks[start / BLOCK_BITS] >> (start % BLOCK_BITS);
        if first != 0 {
            return (start + first.trailing_zeros() as usize) as NI;
        }
        for (i, &block) in blocks.iter().enumerate().skip(start / BLOCK_BITS + 1) {
            if block != 0 {
                return (i * BLOCK_BITS + block.trailing_zeros() as usize) as NI;
            }
        }
        NONE
    }

    /// Call `f` for each set bit in ascending order.
    ///
    /// `f` returns `true` to continue. Returns `false` if `f` stopped the
    /// iteration early.
    pub fn iter_ones<F>(&self, mut f: F) -> bool
    where
        F: FnMut(NI) -> bool,
    {
        for n in self.0.ones() {
            if !f(n as NI) {
                return false;
            }
        }
        true
    }

    /// The set bits as a node list, ascending.
    pub fn to_nodes(&self) -> Vec<NI> {
        self.0.ones().map(|n| n as NI).collect()
    }

    /// In-place intersection with `other`. Lengths must match.
    pub fn intersect_with(&mut self, other: &Bits) {
        debug_assert_eq!(self.0.len(), other.0.len());
        self.0.intersect_with(&other.0);
    }

    /// In-place union with `other`. Lengths must match.
    pub fn union_with(&mut self, other: &Bits) {
        debug_assert_eq!(self.0.len(), other.0.len());
        self.0.union_with(&other.0);
    }

    /// In-place difference: clear every bit set in `other`. Lengths must
    /// match.
    pub fn difference_with(&mut self, other: &Bits) {
        debug_assert_eq!(self.0.len(), other.0.len());
        self.0.difference_with(&other.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_from_scans_across_blocks() {
        let mut b = Bits::with_order(100);
        b.set(3);
        b.set(64);
        b.set(99);
        assert_eq!(b.one_from(0), 3);
        assert_eq!(b.one_from(3), 3);
        assert_eq!(b.one_from(4), 64);
        assert_eq!(b.one_from(65), 99);
        assert_eq!(b.one_from(100), NONE);
        b.clear(99);
        assert_eq!(b.one_from(65), NONE);
    }

    #[test]
    fn iter_ones_stop_flag() {
        let mut b = Bits::with_order(10);
        b.set(1);
        b.set(4);
        b.set(7);
        let mut seen = Vec::new();
        let completed = b.iter_ones(|n| {
            seen.push(n);
            n != 4
        });
        assert!(!completed);
        assert_eq!(seen, vec![1, 4]);
        assert_eq!(b.to_nodes(), vec![1, 4, 7]);
    }

    #[test]
    fn population_and_zero() {
        let mut b = Bits::with_order(70);
        assert!(b.is_zero());
        b.set_all();
        assert_eq!(b.count(), 70);
        b.clear_all();
        assert!(b.is_zero());
        assert_eq!(b.count(), 0);
    }
}
