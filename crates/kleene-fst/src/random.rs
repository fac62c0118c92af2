// Random machines for property tests and benches.

use kleene_core::random::RandomWeight;
use kleene_core::{EPSILON, Semiring, Symbol};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::fsa::Fsa;
use crate::fst::{Fst, Tape};

/// Shape of a random machine.
#[derive(Debug, Clone)]
pub struct RandomFstConfig {
    /// States are numbered `0..num_states`; state 0 is the only initial one.
    pub num_states: u64,
    pub alphabet: Vec<Symbol>,
    /// Probability of an arc between any ordered pair of states.
    pub arc_probability: f64,
    /// Probability that a tape of an arc is `ε` rather than a symbol.
    pub epsilon_probability: f64,
    /// Only allow arcs from lower to higher numbered states.
    pub acyclic: bool,
}

impl Default for RandomFstConfig {
    fn default() -> Self {
        Self {
            num_states: 4,
            alphabet: vec![Symbol::new("a"), Symbol::new("b")],
            arc_probability: 0.5,
            epsilon_probability: 0.2,
            acyclic: false,
        }
    }
}

impl RandomFstConfig {
    pub fn acyclic(mut self) -> Self {
        self.acyclic = true;
        self
    }

    pub fn with_states(mut self, num_states: u64) -> Self {
        self.num_states = num_states;
        self
    }
}

fn random_symbol<R: Rng + ?Sized>(config: &RandomFstConfig, rng: &mut R) -> Symbol {
    if rng.gen_bool(config.epsilon_probability) {
        return EPSILON;
    }
    config
        .alphabet
        .choose(rng)
        .cloned()
        .unwrap_or(EPSILON)
}

/// A random transducer with random non-zero weights.
///
/// State 0 is initial and the highest numbered state is always final; every
/// other state is final with probability one half.
pub fn random_fst<W, R>(config: &RandomFstConfig, rng: &mut R) -> Fst<W>
where
    W: Semiring + RandomWeight,
    R: Rng + ?Sized,
{
    let mut fst = Fst::new();
    let n = config.num_states;
    if n == 0 {
        return fst;
    }

    for i in 0..n {
        fst.add_state(i);
        let targets = if config.acyclic { i + 1..n } else { 0..n };
        for j in targets {
            if rng.gen_bool(config.arc_probability) {
                let a = random_symbol(config, rng);
                let b = random_symbol(config, rng);
                fst.add_arc(i, a, b, j, W::random(rng));
            }
        }
    }

    fst.set_initial(0, W::random(rng));
    for q in 0..n {
        if q == n - 1 || rng.gen_bool(0.5) {
            fst.set_final(q, W::random(rng));
        }
    }
    fst
}

/// A random acceptor: the input projection of [`random_fst`].
pub fn random_fsa<W, R>(config: &RandomFstConfig, rng: &mut R) -> Fsa<W>
where
    W: Semiring + RandomWeight,
    R: Rng + ?Sized,
{
    random_fst(config, rng).project(Tape::Input)
}
