//! A minimal bit vector with word-aligned access, built on
//! `sux::bits::BitVec` — the same in-memory bit-vector type
//! `algo/src/sccs/tarjan.rs` and `algo/src/visits/depth_first/seq.rs` use
//! for their own visited-sets (`BitVec::with_capacity` + `push`,
//! `BitVec::new` + `get`/`set`).
//!
//! This is the storage layer shared by every trie encoding and by
//! [`crate::bits::bp::BpSupport`]: values are pushed once through
//! [`BitVecBuilder`] and frozen into a [`BitVec`].

use sux::bits::BitVec as SuxBitVec;

/// An append-only builder for [`BitVec`], mirroring `tarjan.rs`'s own
/// `BitVec::with_capacity(..)` + repeated `push` construction.
#[derive(Clone, Default)]
pub struct BitVecBuilder {
    inner: SuxBitVec<Vec<usize>>,
}

impl BitVecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            inner: SuxBitVec::with_capacity(bits),
        }
    }

    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.inner.push(bit);
    }

    /// Appends `n` bits, all clear. Useful when a run of `)` is emitted as a
    /// block, as in the DFUDS and LOUDS builders.
    pub fn push_n(&mut self, n: usize, bit: bool) {
        for _ in 0..n {
            self.push(bit);
        }
    }

    pub fn finish(self) -> BitVec {
        BitVec { inner: self.inner }
    }
}

/// An immutable bit vector, frozen after construction.
#[derive(Clone)]
pub struct BitVec {
    inner: SuxBitVec<Vec<usize>>,
}

impl BitVec {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.inner.get(i)
    }

    /// Returns up to 16 bits starting at bit `i`, bit `i` in the low
    /// position. Positions at or beyond `len` read as `0`; callers combine
    /// this with an explicit bounds check (see
    /// [`crate::bits::bp::BpSupport::find_close`]) before trusting a result
    /// that reaches past the end of the vector.
    ///
    /// `sux::bits::BitVec` exposes single-bit `get`, not a windowed word
    /// read, so this walks the window bit by bit rather than reaching past
    /// the public surface this crate otherwise consumes from `sux`.
    #[inline]
    pub fn word16(&self, i: usize) -> u16 {
        let len = self.len();
        let mut w = 0u16;
        for j in 0..16usize {
            if i + j < len && self.get(i + j) {
                w |= 1 << j;
            }
        }
        w
    }

    pub fn count_ones(&self) -> usize {
        (0..self.len()).filter(|&i| self.get(i)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    pub(crate) fn into_inner(self) -> SuxBitVec<Vec<usize>> {
        self.inner
    }
}

impl std::fmt::Debug for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: String = self.iter().map(|b| if b { '1' } else { '0' }).collect();
        f.debug_tuple("BitVec").field(&bits).finish()
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut b = BitVecBuilder::new();
        for bit in iter {
            b.push(bit);
        }
        b.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_get_roundtrip() {
        let bits = [true, false, false, true, true, false, true, false, false];
        let mut b = BitVecBuilder::new();
        for &bit in &bits {
            b.push(bit);
        }
        let bv = b.finish();
        assert_eq!(bv.len(), bits.len());
        for (i, &bit) in bits.iter().enumerate() {
            assert_eq!(bv.get(i), bit, "bit {i}");
        }
    }

    #[test]
    fn word16_extracts_window_with_bit_i_at_position_0() {
        let s = "1011001101001011101";
        let bv: BitVec = s.chars().map(|c| c == '1').collect();
        for i in 0..s.len() {
            let w = bv.word16(i);
            for j in 0..16usize {
                let expected = if i + j < s.len() {
                    s.as_bytes()[i + j] == b'1'
                } else {
                    false
                };
                assert_eq!((w >> j) & 1 == 1, expected, "i={i} j={j}");
            }
        }
    }

    #[test]
    fn count_ones_matches_naive_count() {
        let s = "110100101110011010010";
        let bv: BitVec = s.chars().map(|c| c == '1').collect();
        assert_eq!(bv.count_ones(), s.chars().filter(|&c| c == '1').count());
    }
}
