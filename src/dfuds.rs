//! `Dfuds` — depth-first unary degree sequence trie encoding and lookup
//! (spec.md §3.3, §4.4), built on [`crate::bits::bp::BpSupport`].
//!
//! `original_source/dfuds.hpp` exists in three divergent copies in the
//! retrieved sources (spec.md §9 notes this explicitly), one of which
//! builds each node's own block only *after* fully recursing into its
//! children — a postorder emission that breaks the `find-close`-based
//! `child()` addressing this whole encoding depends on. This module
//! follows spec.md §3.3/§4.4 instead: a node's `d` ones and delimiting
//! zero are written in preorder, before its children are visited, the same
//! way [`crate::louds::Louds`] emits each node's block before descending.

use itertools::Itertools;

use crate::bits::{BitVec, BitVecBuilder, BpSupport, RankSelect};
use crate::error::TrieError;

const DELIM: u8 = 0;
const ROOT_LABEL: u8 = b'^';

/// A depth-first unary degree sequence trie over byte-string keys.
#[derive(Clone)]
pub struct Dfuds {
    bv: RankSelect,
    chars: Vec<u8>,
    leaf: BitVec,
    bp: BpSupport,
    size: usize,
}

impl Dfuds {
    pub fn build<I, S>(keys: I) -> Result<Self, TrieError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let keys: Vec<Vec<u8>> = keys.into_iter().map(|s| s.as_ref().to_vec()).collect();
        check_sorted(&keys)?;

        let mut bv = BitVecBuilder::new();
        let mut chars: Vec<u8> = Vec::new();
        let mut leaf = BitVecBuilder::new();

        bv.push(true);
        chars.push(ROOT_LABEL);

        if keys.is_empty() {
            bv.push(false);
            chars.push(DELIM);
            leaf.push(false);
        } else {
            dfs(&keys, 0, keys.len(), 0, &mut bv, &mut chars, &mut leaf);
        }

        let raw_bv = bv.finish();
        let bp = BpSupport::build(&raw_bv);
        let bv = RankSelect::new(raw_bv);
        let leaf = leaf.finish();
        let size = leaf.count_ones();
        log::debug!("Dfuds::build: {} keys, {} bits", size, bv.len());

        Ok(Self { bv, chars, leaf, bp, size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        let key = key.as_ref();
        let mut idx = 1usize;
        for &c in key {
            let mut i = 0usize;
            while self.bv.bits().get(idx + i) && self.chars[idx + i] < c {
                i += 1;
            }
            if self.chars[idx + i] != c {
                return false;
            }
            idx = self.child(idx, i);
        }
        self.leaf.get(self.rank_r(idx))
    }

    #[inline]
    pub(crate) fn rank_r(&self, i: usize) -> usize {
        i - self.bv.rank1(i)
    }

    #[inline]
    pub(crate) fn degree(&self, x: usize) -> usize {
        self.bv.select0(self.rank_r(x) + 1) - x
    }

    #[inline]
    pub(crate) fn child(&self, x: usize, i: usize) -> usize {
        self.bp.find_close(self.bv.bits(), &self.bv, x + self.degree(x) - 1 - i) + 1
    }
}

fn dfs(
    keys: &[Vec<u8>],
    lo: usize,
    hi: usize,
    d: usize,
    bv: &mut BitVecBuilder,
    chars: &mut Vec<u8>,
    leaf: &mut BitVecBuilder,
) {
    debug_assert!(lo < hi);
    let mut it = lo;
    let mut has_leaf = false;
    if keys[it].len() == d {
        has_leaf = true;
        it += 1;
    }
    let mut groups: Vec<(u8, usize, usize)> = Vec::new();
    while it < hi {
        let start = it;
        debug_assert!(keys[start].len() > d);
        let c = keys[start][d];
        it += 1;
        while it < hi && keys[it][d] == c {
            it += 1;
        }
        groups.push((c, start, it));
    }

    for &(c, _, _) in &groups {
        bv.push(true);
        chars.push(c);
    }
    bv.push(false);
    chars.push(DELIM);
    leaf.push(has_leaf);

    for &(_, gs, ge) in &groups {
        dfs(keys, gs, ge, d + 1, bv, chars, leaf);
    }
}

fn check_sorted(keys: &[Vec<u8>]) -> Result<(), TrieError> {
    for (i, (a, b)) in keys.iter().tuple_windows().enumerate() {
        if !(a < b) {
            return Err(TrieError::InputNotSorted { index: i });
        }
    }
    Ok(())
}

impl std::fmt::Debug for Dfuds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: String = self.bv.bits().iter().map(|b| if b { '1' } else { '0' }).collect();
        f.debug_struct("Dfuds")
            .field("bv", &bits)
            .field("chars", &self.chars)
            .field("leaf_count", &self.size)
            .finish()
    }
}
