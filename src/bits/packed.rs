//! Width-minimized packed integer storage (spec.md §9), built on
//! `sux::bits::BitFieldVec` — the same structure `cli/src/lib.rs`'s
//! `IntVectorFormat::BitFieldVec` uses to store "each element using
//! ⌊log₂(max)⌋ + 1 bits" rather than a fixed machine word per entry.

use sux::bits::BitFieldVec;
use sux::traits::BitFieldSlice;

/// Bits needed to hold `0..=max` (`⌊log₂(max)⌋ + 1`, per `cli/src/lib.rs`'s
/// own description of the format; `max == 0` still reserves one bit, since
/// a zero-width lane can't represent even the value `0`'s own slot).
fn bit_width(max: usize) -> usize {
    if max == 0 {
        1
    } else {
        (usize::BITS - max.leading_zeros()) as usize
    }
}

/// A read-only, width-minimized array of non-negative integers.
#[derive(Clone)]
pub struct PackedInts {
    inner: BitFieldVec<usize, Vec<usize>>,
}

impl PackedInts {
    /// Packs `values` into lanes just wide enough for the largest one,
    /// chosen here after the full set of values is known, matching how
    /// `BitFieldVec::with_capacity` is sized from a known bound (e.g.
    /// `successors`' `n.ilog2_ceil()` in `webgraph/src/graphs/csr_graph.rs`)
    /// rather than grown lane-by-lane.
    pub fn from_slice(values: &[usize]) -> Self {
        let max = values.iter().copied().max().unwrap_or(0);
        let mut inner = BitFieldVec::with_capacity(bit_width(max), values.len());
        inner.extend(values.iter().copied());
        Self { inner }
    }

    #[inline]
    pub fn get(&self, i: usize) -> usize {
        self.inner.get(i)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }
}

impl std::fmt::Debug for PackedInts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<usize> = (0..self.len()).map(|i| self.get(i)).collect();
        f.debug_tuple("PackedInts").field(&values).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_small_values() {
        let values = [0usize, 1, 2, 3, 4, 5];
        let p = PackedInts::from_slice(&values);
        assert_eq!(p.len(), values.len());
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(p.get(i), v);
        }
    }

    #[test]
    fn roundtrips_values_needing_multiple_bytes() {
        let values: Vec<usize> = (0..300).map(|i| i * 37 % 70000).collect();
        let p = PackedInts::from_slice(&values);
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(p.get(i), v, "i={i}");
        }
    }

    #[test]
    fn empty_slice_has_a_one_bit_width_and_zero_length() {
        let p = PackedInts::from_slice(&[]);
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn all_zero_values_still_round_trip() {
        let values = [0usize; 8];
        let p = PackedInts::from_slice(&values);
        for i in 0..values.len() {
            assert_eq!(p.get(i), 0);
        }
    }
}
