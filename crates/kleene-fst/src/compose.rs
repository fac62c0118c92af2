// Epsilon-filtered composition of weighted transducers.
//
// Product states are triples `(q1, f, q2)` where `f` is the epsilon filter's
// state. They are discovered breadth-first from the pairs of initial states,
// so only the accessible part of the product is ever built.

use std::collections::VecDeque;

use hashbrown::HashSet;
use kleene_core::{Semiring, State};
use tracing::{debug, trace};

use crate::config::ComposeConfig;
use crate::filter::{FilterState, filter_transition};
use crate::fst::{Fst, Operand};
use crate::FstError;

type Triple = (State, FilterState, State);

fn product_state((q1, f, q2): &Triple) -> State {
    State::triple(q1.clone(), f.state(), q2.clone())
}

/// Frontier bookkeeping for the product construction.
struct Frontier {
    seen: HashSet<State>,
    queue: VecDeque<Triple>,
    limit: usize,
}

impl Frontier {
    fn new(limit: usize) -> Self {
        Self {
            seen: HashSet::new(),
            queue: VecDeque::new(),
            limit,
        }
    }

    /// Schedule `triple` unless it was already seen.
    fn visit(&mut self, triple: Triple, state: &State) -> Result<(), FstError> {
        if self.seen.contains(state) {
            return Ok(());
        }
        if self.seen.len() >= self.limit {
            return Err(FstError::StateLimitExceeded { limit: self.limit });
        }
        self.seen.insert(state.clone());
        self.queue.push_back(triple);
        Ok(())
    }
}

impl<W: Semiring> Fst<W> {
    /// Compose `self` (applied first) with `other`, using the default
    /// [`ComposeConfig`].
    ///
    /// The result maps `x` to `z` with weight `⊕ T1(x, y) ⊗ T2(y, z)` over all
    /// `y`, and counts every epsilon interleaving exactly once.
    pub fn compose(&self, other: &Fst<W>) -> Result<Fst<W>, FstError> {
        self.compose_with(other, &ComposeConfig::default())
    }

    /// Compose with explicit configuration.
    ///
    /// Returns [`FstError::StateLimitExceeded`] as soon as the product
    /// would hold more than `config.max_states` states.
    pub fn compose_with(&self, other: &Fst<W>, config: &ComposeConfig) -> Result<Fst<W>, FstError> {
        let first = self.augment_epsilon_transitions(Operand::First);
        let second = other.augment_epsilon_transitions(Operand::Second);

        let mut product = Fst::new();
        let mut frontier = Frontier::new(config.max_states);
        let mut rejected = 0usize;

        for (q1, w1) in first.initial() {
            for (q2, w2) in second.initial() {
                let lambda = w1.multiply(w2);
                if lambda.is_zero() {
                    continue;
                }
                let triple = (q1.clone(), FilterState::Neutral, q2.clone());
                let q = product_state(&triple);
                product.set_initial(&q, lambda);
                frontier.visit(triple, &q)?;
            }
        }

        while let Some(triple) = frontier.queue.pop_front() {
            let (q1, q3, q2) = &triple;
            let q = product_state(&triple);

            let rho = first.final_weight(q1).multiply(&second.final_weight(q2));
            if !rho.is_zero() {
                product.set_final(&q, rho);
            }

            for t1 in first.arcs(q1, false) {
                for t2 in second.arcs(q2, false) {
                    let Some(next) = filter_transition(t1.output, t2.input, *q3) else {
                        trace!(state = %q, left = %t1.output, right = %t2.input, "filter rejected pair");
                        rejected += 1;
                        continue;
                    };
                    let target = (t1.target.clone(), next, t2.target.clone());
                    let j = product_state(&target);
                    frontier.visit(target, &j)?;
                    product.add_arc(&q, t1.input, t2.output, j, t1.weight.multiply(t2.weight));
                }
            }
        }

        debug!(
            left = self.num_states(),
            right = other.num_states(),
            product = product.num_states(),
            arcs = product.num_arcs(),
            rejected,
            "composed transducers"
        );

        if config.trim {
            Ok(product.trim())
        } else {
            Ok(product)
        }
    }
}
