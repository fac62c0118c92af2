// Arc labels for acceptors and transducers.

use std::fmt;
use std::sync::Arc;

/// An arc label.
///
/// Labels compare and hash by value. The three epsilons are separate
/// representations rather than reserved strings, so no user label can ever
/// collide with them: `Symbol::new("ε")` is an ordinary label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Repr);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Repr {
    Epsilon,
    Epsilon1,
    Epsilon2,
    Label(Arc<str>),
}

/// The empty symbol.
pub const EPSILON: Symbol = Symbol(Repr::Epsilon);

/// Epsilon variant used on the output side of the first composition operand.
pub const EPSILON_1: Symbol = Symbol(Repr::Epsilon1);

/// Epsilon variant used on the input side of the second composition operand.
pub const EPSILON_2: Symbol = Symbol(Repr::Epsilon2);

impl Symbol {
    /// Create a plain label.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self(Repr::Label(label.into()))
    }

    /// The label text, or `None` for the three epsilons.
    pub fn label(&self) -> Option<&str> {
        match &self.0 {
            Repr::Label(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is the plain epsilon `ε`.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self.0, Repr::Epsilon)
    }

    /// Whether this is one of the composition epsilons `ε₁` or `ε₂`.
    #[inline]
    pub fn is_filter_epsilon(&self) -> bool {
        matches!(self.0, Repr::Epsilon1 | Repr::Epsilon2)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Epsilon => f.write_str("ε"),
            Repr::Epsilon1 => f.write_str("ε₁"),
            Repr::Epsilon2 => f.write_str("ε₂"),
            Repr::Label(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Symbol {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Symbol {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

impl From<char> for Symbol {
    fn from(label: char) -> Self {
        Self::new(label.to_string())
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}
