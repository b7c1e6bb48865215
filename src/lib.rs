#![deny(unsafe_code)]
#![warn(clippy::all)]

//! Succinct, read-only string-set dictionaries.
//!
//! Three trie encodings, all built on the same balanced-parenthesis
//! machinery in [`bits`]:
//!
//! - [`Louds`]: level-order trie, one child-scan per matched byte.
//! - [`Dfuds`]: depth-first trie; descending to a child is a single
//!   `find-close` away rather than a `select0` per level.
//! - [`CentroidPathTrie`]: path-compressed DFUDS — each node owns a
//!   whole run of bytes along its heaviest child chain, with lighter
//!   children recorded in per-node branch tables.
//!
//! All three are built once from a sorted, deduplicated key sequence and
//! support only membership queries afterward; see each type's
//! documentation for its exact layout and complexity.

pub mod bits;
pub mod centroid;
pub mod dfuds;
pub mod error;
pub mod louds;

pub use centroid::CentroidPathTrie;
pub use dfuds::Dfuds;
pub use error::TrieError;
pub use louds::Louds;
