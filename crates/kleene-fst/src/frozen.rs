// Immutable snapshots of acceptors and transducers.

use std::ops::Deref;
use std::sync::Arc;

use crate::graph::{Automaton, WeightedGraph};

/// An immutable snapshot of a machine.
///
/// Produced by `freeze`, which consumes the mutable machine. Only shared
/// access is available through [`Deref`], so every query and every
/// structural transform that returns a new machine still works, while
/// mutation is rejected by the compiler:
///
/// ```compile_fail
/// use kleene_core::Real;
/// use kleene_fst::Fst;
///
/// let mut fst: Fst<Real> = Fst::new();
/// fst.add_arc(0, "a", "b", 1, None);
/// let frozen = fst.freeze();
/// frozen.add_arc(1, "b", "c", 2, None);
/// ```
///
/// Cloning shares the underlying tables. A snapshot of a `Send + Sync`
/// machine is itself `Send + Sync`, so readers on several threads can hold
/// one.
#[derive(Debug)]
pub struct Frozen<T>(Arc<T>);

impl<T> Frozen<T> {
    pub fn new(value: T) -> Self {
        Frozen(Arc::new(value))
    }
}

impl<T: Clone> Frozen<T> {
    /// An independent mutable copy.
    pub fn thaw(&self) -> T {
        T::clone(&self.0)
    }
}

impl<T> Clone for Frozen<T> {
    fn clone(&self) -> Self {
        Frozen(Arc::clone(&self.0))
    }
}

impl<T> Deref for Frozen<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Automaton> Automaton for Frozen<T> {
    type Label = T::Label;
    type Weight = T::Weight;

    fn graph(&self) -> &WeightedGraph<T::Label, T::Weight> {
        self.0.graph()
    }
}
