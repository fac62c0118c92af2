//! Value types shared by every weighted automaton in the workspace.
//!
//! # Architecture
//!
//! - [`semiring`] -- The [`Semiring`] trait and the Boolean, Tropical, Real,
//!   String and Product weights
//! - [`symbol`] -- Arc labels, including the three reserved epsilons
//! - [`state`] -- State identifiers, including tuple states used by composition
//! - [`random`] -- Random weights for tests and benches (feature `random`)

#[cfg(feature = "random")]
pub mod random;
pub mod semiring;
pub mod state;
pub mod symbol;

pub use semiring::{
    Boolean, Product, REAL_TOLERANCE, Real, Semiring, StrictOrder, StringWeight, Tropical,
};
pub use state::State;
pub use symbol::{EPSILON, EPSILON_1, EPSILON_2, Symbol};

/// Error type for semiring operations that are partial.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeightError {
    #[error("{semiring} is not cancellative: inversion is undefined")]
    NotCancellative { semiring: &'static str },
    #[error("division by zero in the {semiring} semiring")]
    DivisionByZero { semiring: &'static str },
    #[error("{operation} is undefined in the {semiring} semiring")]
    Undefined {
        operation: &'static str,
        semiring: &'static str,
    },
}
