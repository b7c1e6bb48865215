//! `Louds` — level-order trie encoding and lookup (spec.md §3.2, §4.3).
//!
//! Built directly on the rank/select contract; it is the only trie here
//! that does not touch [`crate::bits::bp`] (`C does not depend on B`).

use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;

use crate::bits::{BitVec, BitVecBuilder, RankSelect};
use crate::error::TrieError;

const DELIM: u8 = 0;
const ROOT_LABEL: u8 = b'^';

/// A level-order unary degree sequence trie over byte-string keys.
#[derive(Clone)]
pub struct Louds {
    bv: RankSelect,
    chars: Vec<u8>,
    leaf: BitVec,
    size: usize,
}

impl Louds {
    /// Builds a `Louds` trie from a sorted, deduplicated sequence of keys.
    /// Fails with [`TrieError::InputNotSorted`] if the sequence is not
    /// strictly increasing.
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
            let mut queue: VecDeque<(usize, usize, usize)> = VecDeque::new();
            queue.push_back((0, keys.len(), 0));
            while let Some((lo, hi, d)) = queue.pop_front() {
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

                bv.push(false);
                chars.push(DELIM);
                for &(c, gs, ge) in &groups {
                    bv.push(true);
                    chars.push(c);
                    queue.push_back((gs, ge, d + 1));
                }
                leaf.push(has_leaf);
            }
        }

        let bv = RankSelect::new(bv.finish());
        let leaf = leaf.finish();
        let size = leaf.count_ones();
        log::debug!("Louds::build: {} keys, {} bits, {} nodes", size, bv.len(), leaf.len());

        Ok(Self { bv, chars, leaf, size })
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
            idx += 1;
            while self.chars[idx] != DELIM && self.chars[idx] < c {
                idx += 1;
            }
            if self.chars[idx] != c {
                return false;
            }
            idx = self.child(idx);
        }
        self.leaf.get(self.rank0(idx))
    }

    #[inline]
    fn rank0(&self, i: usize) -> usize {
        i - self.bv.rank1(i)
    }

    #[inline]
    fn child(&self, i: usize) -> usize {
        self.bv.select0(self.bv.rank1(i) + 1)
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

impl fmt::Debug for Louds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: String = self.bv.bits().iter().map(|b| if b { '1' } else { '0' }).collect();
        f.debug_struct("Louds")
            .field("bv", &bits)
            .field("chars", &self.chars)
            .field("leaf_count", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trie() {
        let t = Louds::build(Vec::<&str>::new()).unwrap();
        assert!(t.is_empty());
        assert!(!t.contains(""));
    }

    #[test]
    fn singleton_empty_key() {
        let t = Louds::build([""]).unwrap();
        assert_eq!(t.size(), 1);
        assert!(t.contains(""));
        assert!(!t.contains("a"));
    }

    /// spec.md §8 scenario S2.
    #[test]
    fn prefix_chain() {
        let t = Louds::build(["", "a", "ab", "abc"]).unwrap();
        assert!(t.contains(""));
        assert!(t.contains("a"));
        assert!(t.contains("ab"));
        assert!(t.contains("abc"));
        assert!(!t.contains("abcd"));
        assert!(!t.contains("b"));
    }

    /// spec.md §8 scenario S1.
    #[test]
    fn disjoint_keys() {
        let t = Louds::build(["aa", "ab", "bc", "ca", "cb", "cc"]).unwrap();
        for k in ["aa", "ab", "bc", "ca", "cb", "cc"] {
            assert!(t.contains(k), "{k}");
        }
        for k in ["", "a", "b", "ac", "ba", "cd", "aaa"] {
            assert!(!t.contains(k), "{k}");
        }
        assert_eq!(t.size(), 6);
    }

    /// spec.md §8 scenario S5.
    #[test]
    fn rejects_unsorted_input() {
        let err = Louds::build(["b", "a"]).unwrap_err();
        assert!(matches!(err, TrieError::InputNotSorted { index: 0 }));
    }

    #[test]
    fn holdout_keys_are_rejected() {
        let t = Louds::build(["apple", "banana", "cherry"]).unwrap();
        for k in ["apple", "banana", "cherry"] {
            assert!(t.contains(k));
        }
        for k in ["app", "bananas", "cherryy", "date"] {
            assert!(!t.contains(k));
        }
    }
}
