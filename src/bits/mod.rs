//! Bit-level machinery shared by every trie encoding: storage
//! ([`bitvec`]), width-minimized packed integer arrays ([`packed`]), the
//! rank/select contract consumed throughout ([`rank_select`]), word-parallel
//! bracket primitives ([`word`]), and the pioneer-family `find-close`/
//! `find-open` support built on top of them ([`bp`]).

pub mod bitvec;
pub mod bp;
pub mod packed;
pub mod rank_select;
pub mod word;

pub use bitvec::{BitVec, BitVecBuilder};
pub use bp::{BpSupport, ReversedBp};
pub use packed::PackedInts;
pub use rank_select::RankSelect;
