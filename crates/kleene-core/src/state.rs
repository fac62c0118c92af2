// State identifiers.

use std::fmt;
use std::sync::Arc;

/// A state identifier.
///
/// Identity is by value: two states built from equal identifiers are equal and
/// interchangeable as map keys. Tuple states name the Cartesian product of
/// other states and are what composition produces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(Repr);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Repr {
    Id(u64),
    Label(Arc<str>),
    Tuple(Arc<[State]>),
}

impl State {
    pub fn new(id: u64) -> Self {
        Self(Repr::Id(id))
    }

    pub fn labeled(label: impl Into<Arc<str>>) -> Self {
        Self(Repr::Label(label.into()))
    }

    pub fn pair(p: State, q: State) -> Self {
        Self(Repr::Tuple(Arc::from([p, q])))
    }

    pub fn triple(p: State, q: State, r: State) -> Self {
        Self(Repr::Tuple(Arc::from([p, q, r])))
    }

    /// The numeric identifier, if this state was built from one.
    pub fn id(&self) -> Option<u64> {
        match self.0 {
            Repr::Id(id) => Some(id),
            _ => None,
        }
    }

    /// The component states of a tuple state.
    pub fn components(&self) -> Option<&[State]> {
        match &self.0 {
            Repr::Tuple(parts) => Some(parts),
            _ => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Id(id) => write!(f, "{id}"),
            Repr::Label(s) => f.write_str(s),
            Repr::Tuple(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
        }
    }
}

macro_rules! state_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for State {
                fn from(id: $t) -> Self {
                    Self::new(id as u64)
                }
            }
        )*
    };
}

state_from_int!(u8, u16, u32, u64, usize, i32);

impl From<&str> for State {
    fn from(label: &str) -> Self {
        Self::labeled(label)
    }
}

impl From<String> for State {
    fn from(label: String) -> Self {
        Self::labeled(label)
    }
}

impl From<&State> for State {
    fn from(state: &State) -> Self {
        state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn identity_by_value() {
        let mut map = HashMap::new();
        map.insert(State::from(3u32), "three");
        assert_eq!(map.get(&State::new(3)), Some(&"three"));
        assert_eq!(State::from("q"), State::labeled(String::from("q")));
        assert_ne!(State::from("3"), State::new(3));
    }

    #[test]
    fn tuple_states() {
        let p = State::pair(State::new(0), State::new(1));
        assert_eq!(p, State::pair(State::new(0), State::new(1)));
        assert_ne!(p, State::pair(State::new(1), State::new(0)));
        assert_eq!(p.components().map(<[State]>::len), Some(2));
        assert_eq!(p.id(), None);

        let t = State::triple(State::new(0), State::new(2), State::from("x"));
        assert_eq!(t.to_string(), "(0, 2, x)");
    }

    #[test]
    fn nested_display() {
        let inner = State::pair(State::new(1), State::new(2));
        let outer = State::pair(inner, State::new(3));
        assert_eq!(outer.to_string(), "((1, 2), 3)");
    }
}
