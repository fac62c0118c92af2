//! Weighted finite-state acceptors and transducers.
//!
//! Machines are generic over a [`Semiring`](kleene_core::Semiring) and are
//! built arc by arc, then optionally frozen into an immutable, shareable
//! snapshot. Transducers compose with a three-state epsilon filter so that
//! epsilon moves on either side are counted exactly once.
//!
//! # Architecture
//!
//! - [`graph`] -- Shared state/arc tables and reachability
//! - [`transition`] -- Borrowed view of one transducer arc
//! - [`fsa`] -- Weighted acceptors
//! - [`fst`] -- Weighted transducers and epsilon augmentation
//! - [`frozen`] -- Immutable snapshots
//! - [`filter`] -- The epsilon filter (function and automaton)
//! - [`compose`] -- Epsilon-filtered composition
//! - [`config`] -- Composition configuration
//! - [`pathsum`] -- Reference pathsum (Lehmann and Viterbi)
//! - [`random`] -- Random machines for tests and benches (feature `random`)

pub mod compose;
pub mod config;
pub mod filter;
pub mod frozen;
pub mod fsa;
pub mod fst;
pub mod graph;
pub mod pathsum;
#[cfg(feature = "random")]
pub mod random;
pub mod transition;

pub use config::ComposeConfig;
pub use filter::{FilterState, epsilon_filter, filter_transition};
pub use frozen::Frozen;
pub use fsa::Fsa;
pub use fst::{Fst, Operand, Tape};
pub use graph::{Automaton, Label, WeightedGraph};
pub use pathsum::{Strategy, pathsum, pathsums_agree};
pub use transition::Transition;

use kleene_core::WeightError;

/// Error type for automaton algorithms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FstError {
    #[error(transparent)]
    Weight(#[from] WeightError),
    #[error("composition exceeded the limit of {limit} states")]
    StateLimitExceeded { limit: usize },
    #[error("machine has a cycle; use Strategy::Lehmann")]
    Cyclic,
}

/// Default cap on the number of product states a composition may create.
/// Acts as a safety limit against runaway products.
pub const DEFAULT_MAX_STATES: usize = 1_000_000;
