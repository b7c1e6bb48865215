//! The two error kinds a trie's public API surfaces (spec.md §7): a
//! reported construction failure, and a programmer-error contract
//! violation that callers are not expected to recover from.

use thiserror::Error;

/// Errors raised while building or querying a succinct trie.
#[derive(Debug, Error)]
pub enum TrieError {
    /// `build()` received a sequence that was not strictly increasing.
    #[error("input string collection is not sorted (offending pair at index {index})")]
    InputNotSorted { index: usize },

    /// A precondition the public API documents as caller-enforced was
    /// violated (e.g. `find_close` on a close bracket, an out-of-range
    /// rank/select query). These indicate a bug at the call site, not a bad
    /// input, and are not expected to be handled — they exist so call
    /// sites that do want to convert them into `anyhow::Error` have
    /// something typed to match on.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}
