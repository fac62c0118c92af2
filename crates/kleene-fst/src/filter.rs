// Epsilon filter for composition.
//
// Composing two transducers that both have epsilon moves admits many
// interleavings of the same path: wait on the left then move on the right,
// or the other way round, or move both at once. The filter accepts exactly
// one interleaving per path. It works on the relabelled epsilons produced by
// `Fst::augment_epsilon_transitions`:
//
// - `ε₂:ε₁` moves both operands on an epsilon at once;
// - `ε₁:ε₁` keeps the first operand waiting while the second moves;
// - `ε₂:ε₂` keeps the second operand waiting while the first moves.
//
// Once one side has started waiting, the filter refuses to switch to the
// other side until a real symbol is matched.

use kleene_core::{EPSILON_1, EPSILON_2, Semiring, State, Symbol};

use crate::fst::Fst;

/// State of the epsilon filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterState {
    /// State 0: no epsilon run in progress.
    Neutral,
    /// State 1: the first operand is waiting (`ε₁:ε₁` run).
    EpsilonOne,
    /// State 2: the second operand is waiting (`ε₂:ε₂` run).
    EpsilonTwo,
}

impl FilterState {
    pub const ALL: [FilterState; 3] = [
        FilterState::Neutral,
        FilterState::EpsilonOne,
        FilterState::EpsilonTwo,
    ];

    pub fn index(self) -> u64 {
        match self {
            FilterState::Neutral => 0,
            FilterState::EpsilonOne => 1,
            FilterState::EpsilonTwo => 2,
        }
    }

    /// The filter automaton's state for this filter state.
    pub fn state(self) -> State {
        State::new(self.index())
    }
}

/// Next filter state after matching `a1` (output of the first operand) with
/// `a2` (input of the second) in filter state `q3`.
///
/// `None` is the sink `⊥`: the pair is not allowed here and the product arc is
/// pruned.
pub fn filter_transition(a1: &Symbol, a2: &Symbol, q3: FilterState) -> Option<FilterState> {
    use FilterState::{EpsilonOne, EpsilonTwo, Neutral};

    if a1 == a2 && !a1.is_filter_epsilon() {
        Some(Neutral)
    } else if *a1 == EPSILON_2 && *a2 == EPSILON_1 && q3 == Neutral {
        Some(Neutral)
    } else if *a1 == EPSILON_1 && *a2 == EPSILON_1 && q3 != EpsilonTwo {
        Some(EpsilonOne)
    } else if *a1 == EPSILON_2 && *a2 == EPSILON_2 && q3 != EpsilonOne {
        Some(EpsilonTwo)
    } else {
        None
    }
}

/// The three-state epsilon filter transducer over `alphabet ∪ {ε₁, ε₂}`.
///
/// Every arc and every final weight is `one`; state 0 is the only initial
/// state and all three states are final.
pub fn epsilon_filter<W, I>(alphabet: I) -> Fst<W>
where
    W: Semiring,
    I: IntoIterator,
    I::Item: Into<Symbol>,
{
    use FilterState::{EpsilonOne, EpsilonTwo, Neutral};

    let (q0, q1, q2) = (Neutral.state(), EpsilonOne.state(), EpsilonTwo.state());
    let mut filter = Fst::new();

    for a in alphabet {
        let a: Symbol = a.into();
        for q in [&q0, &q1, &q2] {
            filter.add_arc(q, &a, &a, &q0, W::one());
        }
    }

    filter.add_arc(&q0, EPSILON_2, EPSILON_1, &q0, W::one());
    filter.add_arc(&q0, EPSILON_1, EPSILON_1, &q1, W::one());
    filter.add_arc(&q0, EPSILON_2, EPSILON_2, &q2, W::one());
    filter.add_arc(&q1, EPSILON_1, EPSILON_1, &q1, W::one());
    filter.add_arc(&q2, EPSILON_2, EPSILON_2, &q2, W::one());

    filter.set_initial(&q0, W::one());
    for q in [&q0, &q1, &q2] {
        filter.set_final(q, W::one());
    }
    filter
}
