// Borrowed view of a single transducer arc.

use std::fmt;

use kleene_core::{State, Symbol};

/// One arc `input:output/weight -> target` leaving some state of an
/// [`Fst`](crate::Fst).
///
/// Borrowed from the transducer's tables; cloning the fields yields an owned
/// arc.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<'a, W> {
    pub input: &'a Symbol,
    pub output: &'a Symbol,
    pub target: &'a State,
    pub weight: &'a W,
}

impl<W> Transition<'_, W> {
    /// Whether both tapes are the plain epsilon.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.input.is_epsilon() && self.output.is_epsilon()
    }
}

impl<W: fmt::Display> fmt::Display for Transition<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}/{} -> {}",
            self.input, self.output, self.weight, self.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kleene_core::{EPSILON, Tropical};

    #[test]
    fn display_and_epsilon() {
        let a = Symbol::new("a");
        let q = State::new(3);
        let w = Tropical(1.5);
        let t = Transition {
            input: &a,
            output: &EPSILON,
            target: &q,
            weight: &w,
        };
        assert_eq!(t.to_string(), "a:ε/1.5 -> 3");
        assert!(!t.is_epsilon());

        let e = Transition {
            input: &EPSILON,
            output: &EPSILON,
            target: &q,
            weight: &w,
        };
        assert!(e.is_epsilon());
    }
}
