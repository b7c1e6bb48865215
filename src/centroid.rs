//! `CentroidPathTrie` — path-compressed DFUDS variant with centroid-path
//! labels and branch tables (spec.md §3.4, §4.5).
//!
//! Construction mirrors `original_source/centroid_path_tree.hpp`'s two
//! phases: `build_raw` groups the sorted key range by first byte at the
//! current depth, always descending into the heaviest group first with
//! the path's starting depth held fixed, so a single [`RawNode`] ends up
//! owning every byte along an uninterrupted heavy-child chain; lighter
//! groups become that node's branches. `pack` then walks the raw tree
//! into the DFUDS-shaped `bv`/`cs`/`bl`/`bs`/`is` arrays `contains` reads.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::bits::{BitVec, BitVecBuilder, BpSupport, PackedInts, RankSelect};
use crate::error::TrieError;

const DELIM: u8 = 0;
const END_LABEL: u8 = 0;

struct RawNode {
    /// The full byte run along this node's centroid path, from the depth
    /// at which its owning chain started.
    label: Vec<u8>,
    /// `(branch position within `label`, branch character) -> child id`,
    /// ordered exactly as the packed layout needs: branch position
    /// ascending, then character ascending.
    children: BTreeMap<(usize, u8), usize>,
    size: usize,
}

fn build_raw(keys: &[Vec<u8>], lo: usize, hi: usize, top: usize, dep: usize, nodes: &mut Vec<RawNode>) -> usize {
    debug_assert!(lo < hi);
    if hi - lo == 1 {
        let id = nodes.len();
        nodes.push(RawNode {
            label: keys[lo][top..].to_vec(),
            children: BTreeMap::new(),
            size: 1,
        });
        return id;
    }

    let mut it = lo;
    let mut groups: Vec<(usize, usize, usize, u8)> = Vec::new();
    if keys[it].len() == dep {
        groups.push((1, it, it + 1, END_LABEL));
        it += 1;
    }
    while it < hi {
        let start = it;
        let c = keys[start][dep];
        it += 1;
        let mut sz = 1;
        while it < hi && keys[it][dep] == c {
            it += 1;
            sz += 1;
        }
        groups.push((sz, start, it, c));
    }

    let mut order: Vec<usize> = (0..groups.len()).collect();
    order.sort_by(|&a, &b| groups[b].0.cmp(&groups[a].0));

    let (_, cb, ce, _) = groups[order[0]];
    let par = build_raw(keys, cb, ce, top, dep + 1, nodes);
    for &gi in &order[1..] {
        let (_, cb2, ce2, c) = groups[gi];
        let cid = build_raw(keys, cb2, ce2, dep, dep + 1, nodes);
        nodes[par].children.insert((dep - top, c), cid);
        let added = nodes[cid].size;
        nodes[par].size += added;
    }
    par
}

fn pack(
    id: usize,
    raw: &[RawNode],
    bv: &mut BitVecBuilder,
    cs: &mut Vec<u8>,
    bl: &mut BitVecBuilder,
    bs: &mut BitVecBuilder,
    is: &mut Vec<usize>,
    labels: &mut Vec<Vec<u8>>,
) {
    let node = &raw[id];
    labels.push(if id == 0 { node.label.clone() } else { node.label[1..].to_vec() });

    let entries: Vec<(usize, u8, usize)> = node.children.iter().map(|(&(pos, c), &cid)| (pos, c, cid)).collect();
    let base = if id == 0 { 0 } else { 1 };

    let mut local_bl = vec![false; entries.len()];
    let mut prev_pos: Option<usize> = None;
    for (k, &(pos, _, _)) in entries.iter().enumerate() {
        if prev_pos != Some(pos) {
            if prev_pos.is_some() {
                local_bl[k - 1] = true;
            }
            is.push(pos - base);
            prev_pos = Some(pos);
        }
    }
    if let Some(last) = local_bl.last_mut() {
        *last = true;
    }

    for (k, &(pos, c, _)) in entries.iter().enumerate() {
        bv.push(true);
        let centroid_char = node.label.get(pos).copied().unwrap_or(0);
        bs.push(centroid_char < c);
        cs.push(c);
        bl.push(local_bl[k]);
    }
    bv.push(false);
    cs.push(DELIM);
    bs.push(false);
    bl.push(false);

    for &(_, _, cid) in &entries {
        pack(cid, raw, bv, cs, bl, bs, is, labels);
    }
}

/// A path-compressed DFUDS trie: each node's centroid-path run is stored
/// as a label string, with light (non-heavy) children recorded as
/// ascending branch groups.
#[derive(Clone)]
pub struct CentroidPathTrie {
    bv: RankSelect,
    cs: Vec<u8>,
    bl: RankSelect,
    #[allow(dead_code)]
    bs: BitVec,
    is: PackedInts,
    labels: Vec<Vec<u8>>,
    bp: BpSupport,
    size: usize,
}

impl CentroidPathTrie {
    pub fn build<I, S>(keys: I) -> Result<Self, TrieError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let keys: Vec<Vec<u8>> = keys.into_iter().map(|s| s.as_ref().to_vec()).collect();
        check_sorted(&keys)?;

        let mut bv = BitVecBuilder::new();
        let mut cs: Vec<u8> = Vec::new();
        let mut bl = BitVecBuilder::new();
        let mut bs = BitVecBuilder::new();
        let mut is: Vec<usize> = Vec::new();
        let mut labels: Vec<Vec<u8>> = Vec::new();

        bv.push(true);
        cs.push(DELIM);
        bl.push(false);
        bs.push(false);

        let size;
        if keys.is_empty() {
            labels.push(Vec::new());
            bv.push(false);
            cs.push(DELIM);
            bl.push(false);
            bs.push(false);
            size = 0;
        } else {
            let mut raw_nodes: Vec<RawNode> = Vec::new();
            let root = build_raw(&keys, 0, keys.len(), 0, 0, &mut raw_nodes);
            debug_assert_eq!(root, 0, "root of the raw centroid tree must be node 0");
            size = raw_nodes[0].size;
            pack(0, &raw_nodes, &mut bv, &mut cs, &mut bl, &mut bs, &mut is, &mut labels);
        }

        let raw_bv = bv.finish();
        let bp = BpSupport::build(&raw_bv);
        let bv = RankSelect::new(raw_bv);
        let bl = RankSelect::new(bl.finish());
        let bs = bs.finish();
        let is = PackedInts::from_slice(&is);
        log::debug!("CentroidPathTrie::build: {size} keys, {} nodes", labels.len());

        Ok(Self { bv, cs, bl, bs, is, labels, bp, size })
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
        let mut id = 0usize;
        let mut d = 0usize;
        let mut k = 0usize;
        while k < key.len() {
            if self.labels[id].get(k - d).copied() != Some(key[k]) {
                let (b, r, bdeg) = match self.find_branch_group(idx, k - d) {
                    Some(found) => found,
                    None => return false,
                };
                let mut i = if b == 0 { 0 } else { self.bl.select1(r + b) + 1 - idx };
                loop {
                    if self.cs[idx + i] == key[k] {
                        break;
                    }
                    if self.bl.bits().get(idx + i) {
                        return false;
                    }
                    i += 1;
                }
                let _ = bdeg;
                d = k + 1;
                idx = self.child(idx, i);
                id = self.rank_r(idx);
            }
            k += 1;
        }

        if self.labels[id].len() == k - d {
            return true;
        }
        let (b, r, _) = match self.find_branch_group(idx, k - d) {
            Some(found) => found,
            None => return false,
        };
        let mut i = if b == 0 { 0 } else { self.bl.select1(r + b) + 1 - idx };
        loop {
            if self.cs[idx + i] == END_LABEL {
                return true;
            }
            if self.bl.bits().get(idx + i) {
                return false;
            }
            i += 1;
        }
    }

    /// Locates the branch group at exactly `target` (a centroid-label-
    /// relative position) among the node starting at `idx`. Returns the
    /// group's index `b` and rank `r` for further use by the caller.
    fn find_branch_group(&self, idx: usize, target: usize) -> Option<(usize, usize, usize)> {
        let r = self.bl.rank1(idx);
        let deg = self.degree(idx);
        let bdeg = self.bl.rank1(idx + deg) - r;
        let mut b = 0usize;
        while b < bdeg && self.is.get(r + b) < target {
            b += 1;
        }
        if b == bdeg || self.is.get(r + b) != target {
            return None;
        }
        Some((b, r, bdeg))
    }

    #[inline]
    fn rank_r(&self, i: usize) -> usize {
        i - self.bv.rank1(i)
    }

    #[inline]
    fn degree(&self, x: usize) -> usize {
        self.bv.select0(self.rank_r(x) + 1) - x
    }

    #[inline]
    fn child(&self, x: usize, i: usize) -> usize {
        self.bp.find_close(self.bv.bits(), &self.bv, x + self.degree(x) - 1 - i) + 1
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

impl std::fmt::Debug for CentroidPathTrie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: String = self.bv.bits().iter().map(|b| if b { '1' } else { '0' }).collect();
        let labels: Vec<String> = self.labels.iter().map(|l| String::from_utf8_lossy(l).into_owned()).collect();
        f.debug_struct("CentroidPathTrie")
            .field("bv", &bits)
            .field("labels", &labels)
            .field("is", &self.is)
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trie() {
        let t = CentroidPathTrie::build(Vec::<&str>::new()).unwrap();
        assert!(t.is_empty());
        assert!(!t.contains(""));
    }

    #[test]
    fn singleton_empty_key() {
        let t = CentroidPathTrie::build([""]).unwrap();
        assert_eq!(t.size(), 1);
        assert!(t.contains(""));
        assert!(!t.contains("a"));
    }

    /// spec.md §8 scenario S1.
    #[test]
    fn disjoint_keys() {
        let t = CentroidPathTrie::build(["aa", "ab", "bc", "ca", "cb", "cc"]).unwrap();
        for k in ["aa", "ab", "bc", "ca", "cb", "cc"] {
            assert!(t.contains(k), "{k}");
        }
        for k in ["", "a", "b", "ac", "ba", "cd", "aaa"] {
            assert!(!t.contains(k), "{k}");
        }
        assert_eq!(t.size(), 6);
    }

    /// spec.md §8 scenario S2.
    #[test]
    fn prefix_chain() {
        let t = CentroidPathTrie::build(["", "a", "ab", "abc"]).unwrap();
        assert!(t.contains(""));
        assert!(t.contains("a"));
        assert!(t.contains("ab"));
        assert!(t.contains("abc"));
        assert!(!t.contains("abcd"));
        assert!(!t.contains("b"));
    }

    /// spec.md §8 scenario S4.
    #[test]
    fn centroid_path_scenario() {
        let keys = ["banana", "band", "bandana", "bank"];
        let t = CentroidPathTrie::build(keys).unwrap();
        for k in keys {
            assert!(t.contains(k), "{k}");
        }
        for k in ["ban", "banan", "bandan"] {
            assert!(!t.contains(k), "{k}");
        }
        assert!(t.contains("bandana"));
        assert_eq!(t.size(), 4);
    }

    /// spec.md §8 scenario S5.
    #[test]
    fn rejects_unsorted_input() {
        let err = CentroidPathTrie::build(["b", "a"]).unwrap_err();
        assert!(matches!(err, TrieError::InputNotSorted { index: 0 }));
    }

    #[test]
    fn single_key() {
        let t = CentroidPathTrie::build(["hello"]).unwrap();
        assert!(t.contains("hello"));
        assert!(!t.contains("hell"));
        assert!(!t.contains("helloo"));
        assert_eq!(t.size(), 1);
    }
}
