// Weighted finite-state acceptors.

use std::fmt;

use hashbrown::HashSet;
use kleene_core::{Semiring, State, Symbol};
use tracing::debug;

use crate::frozen::Frozen;
use crate::graph::{Automaton, WeightedGraph};

/// A weighted finite-state acceptor `⟨Σ, Q, I, F, δ, λ, ρ⟩` over the
/// semiring `W`.
#[derive(Debug, Clone)]
pub struct Fsa<W> {
    sigma: HashSet<Symbol>,
    graph: WeightedGraph<Symbol, W>,
}

impl<W: Semiring> Default for Fsa<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Semiring> Fsa<W> {
    pub fn new() -> Self {
        Self {
            sigma: HashSet::new(),
            graph: WeightedGraph::new(),
        }
    }

    pub fn add_state(&mut self, q: impl Into<State>) {
        self.graph.add_state(q.into());
    }

    /// Add an arc `i -a/w-> j`, summing into any existing arc with the same
    /// endpoints and label. `None` stands for `one`.
    pub fn add_arc(
        &mut self,
        i: impl Into<State>,
        a: impl Into<Symbol>,
        j: impl Into<State>,
        w: impl Into<Option<W>>,
    ) {
        let a = a.into();
        self.sigma.insert(a.clone());
        let w = w.into().unwrap_or_else(W::one);
        self.graph.add_arc(i.into(), a, j.into(), w);
    }

    /// Like [`add_arc`](Self::add_arc) but replaces the existing weight.
    pub fn set_arc(
        &mut self,
        i: impl Into<State>,
        a: impl Into<Symbol>,
        j: impl Into<State>,
        w: impl Into<Option<W>>,
    ) {
        let a = a.into();
        self.sigma.insert(a.clone());
        let w = w.into().unwrap_or_else(W::one);
        self.graph.set_arc(i.into(), a, j.into(), w);
    }

    pub fn set_initial(&mut self, q: impl Into<State>, w: impl Into<Option<W>>) {
        self.graph
            .set_initial(q.into(), w.into().unwrap_or_else(W::one));
    }

    pub fn set_final(&mut self, q: impl Into<State>, w: impl Into<Option<W>>) {
        self.graph
            .set_final(q.into(), w.into().unwrap_or_else(W::one));
    }

    /// Outgoing arcs of `i` as `(symbol, target, weight)`, skipping zero
    /// weights and, with `no_eps`, arcs labeled `ε`.
    pub fn arcs<'a>(
        &'a self,
        i: &State,
        no_eps: bool,
    ) -> impl Iterator<Item = (&'a Symbol, &'a State, &'a W)> + use<'a, W> {
        self.graph
            .arcs(i)
            .filter(move |(a, _, _)| !(no_eps && a.is_epsilon()))
    }

    pub fn alphabet(&self) -> &HashSet<Symbol> {
        &self.sigma
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.graph.states()
    }

    pub fn num_states(&self) -> usize {
        self.graph.num_states()
    }

    pub fn num_arcs(&self) -> usize {
        self.graph.num_arcs()
    }

    pub fn initial(&self) -> impl Iterator<Item = (&State, &W)> {
        self.graph.initial()
    }

    pub fn finals(&self) -> impl Iterator<Item = (&State, &W)> {
        self.graph.finals()
    }

    pub fn accessible(&self) -> HashSet<State> {
        self.graph.accessible()
    }

    pub fn coaccessible(&self) -> HashSet<State> {
        self.graph.coaccessible()
    }

    /// An empty acceptor in the same semiring, optionally carrying over the
    /// initial and final weights.
    pub fn spawn(&self, keep_init: bool, keep_final: bool) -> Self {
        let mut fsa = Self::new();
        if keep_init {
            for (q, w) in self.initial() {
                fsa.graph.set_initial(q.clone(), w.clone());
            }
        }
        if keep_final {
            for (q, w) in self.finals() {
                fsa.graph.set_final(q.clone(), w.clone());
            }
        }
        fsa
    }

    /// Flip every arc and swap the initial and final weights.
    pub fn reverse(&self) -> Self {
        let mut rev = self.spawn(false, false);
        for i in self.graph.states() {
            rev.graph.add_state(i.clone());
            for (a, j, w) in self.graph.arcs(i) {
                rev.sigma.insert(a.clone());
                rev.graph.add_arc(j.clone(), a.clone(), i.clone(), w.clone());
            }
        }
        for (q, w) in self.initial() {
            rev.graph.set_final(q.clone(), w.clone());
        }
        for (q, w) in self.finals() {
            rev.graph.set_initial(q.clone(), w.clone());
        }
        rev
    }

    /// Restrict to states that are both accessible and co-accessible.
    pub fn trim(&self) -> Self {
        let useful = self.graph.useful();
        let mut trimmed = self.spawn(false, false);
        for i in &useful {
            trimmed.graph.add_state(i.clone());
            for (a, j, w) in self.graph.arcs(i) {
                if useful.contains(j) {
                    trimmed.sigma.insert(a.clone());
                    trimmed
                        .graph
                        .add_arc(i.clone(), a.clone(), j.clone(), w.clone());
                }
            }
        }
        for (q, w) in self.initial().filter(|(q, _)| useful.contains(*q)) {
            trimmed.graph.set_initial(q.clone(), w.clone());
        }
        for (q, w) in self.finals().filter(|(q, _)| useful.contains(*q)) {
            trimmed.graph.set_final(q.clone(), w.clone());
        }
        debug!(
            before = self.num_states(),
            after = trimmed.num_states(),
            "trimmed acceptor"
        );
        trimmed
    }

    /// Freeze into an immutable snapshot.
    pub fn freeze(self) -> Frozen<Self> {
        Frozen::new(self)
    }

    pub(crate) fn from_parts(sigma: HashSet<Symbol>, graph: WeightedGraph<Symbol, W>) -> Self {
        Self { sigma, graph }
    }
}

impl<W: Semiring> Automaton for Fsa<W> {
    type Label = Symbol;
    type Weight = W;

    fn graph(&self) -> &WeightedGraph<Symbol, W> {
        &self.graph
    }
}

impl<W: Semiring> fmt::Display for Fsa<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states: Vec<&State> = self.states().collect();
        states.sort();
        for q in &states {
            let mut lines: Vec<String> = self
                .arcs(q, false)
                .map(|(a, j, w)| format!("{q} -{a}/{w}-> {j}"))
                .collect();
            lines.sort();
            for line in lines {
                writeln!(f, "{line}")?;
            }
        }
        for q in &states {
            let lambda = self.graph.initial_weight(q);
            if !lambda.is_zero() {
                writeln!(f, "initial {q} / {lambda}")?;
            }
            let rho = self.graph.final_weight(q);
            if !rho.is_zero() {
                writeln!(f, "final {q} / {rho}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kleene_core::{EPSILON, Real, Tropical};

    fn s(id: u64) -> State {
        State::new(id)
    }

    fn sample() -> Fsa<Real> {
        let mut fsa: Fsa<Real> = Fsa::new();
        fsa.set_initial(0, None);
        fsa.add_arc(0, "a", 1, Real(0.5));
        fsa.add_arc(1, "b", 2, Real(0.25));
        fsa.add_arc(1, EPSILON, 2, Real(0.1));
        fsa.set_final(2, Real(0.8));
        fsa
    }

    #[test]
    fn add_arc_registers_states_and_symbols() {
        let fsa = sample();
        assert_eq!(fsa.num_states(), 3);
        assert_eq!(fsa.alphabet().len(), 3);
        assert!(fsa.alphabet().contains(&Symbol::new("a")));
        assert!(fsa.alphabet().contains(&EPSILON));
    }

    #[test]
    fn default_weight_is_one() {
        let mut fsa: Fsa<Tropical> = Fsa::new();
        fsa.add_arc(0, 'x', 1, None);
        let (_, _, w) = fsa.arcs(&s(0), false).next().unwrap();
        assert_eq!(*w, Tropical::one());
    }

    #[test]
    fn add_accumulates_set_overwrites() {
        let mut added: Fsa<Real> = Fsa::new();
        added.add_arc(0, "a", 1, Real(0.2));
        added.add_arc(0, "a", 1, Real(0.3));
        let (_, _, w) = added.arcs(&s(0), false).next().unwrap();
        assert_eq!(*w, Real(0.5));

        let mut set: Fsa<Real> = Fsa::new();
        set.add_arc(0, "a", 1, Real(0.2));
        set.set_arc(0, "a", 1, Real(0.3));
        let (_, _, w) = set.arcs(&s(0), false).next().unwrap();
        assert_eq!(*w, Real(0.3));
    }

    #[test]
    fn arcs_can_skip_epsilon() {
        let fsa = sample();
        assert_eq!(fsa.arcs(&s(1), false).count(), 2);
        let non_eps: Vec<_> = fsa.arcs(&s(1), true).collect();
        assert_eq!(non_eps.len(), 1);
        assert_eq!(non_eps[0].0, &Symbol::new("b"));
    }

    #[test]
    fn arcs_are_restartable() {
        let mut fsa = sample();
        assert_eq!(fsa.arcs(&s(0), false).count(), 1);
        fsa.add_arc(0, "c", 2, None);
        assert_eq!(fsa.arcs(&s(0), false).count(), 2);
    }

    #[test]
    fn reverse_swaps_everything() {
        let fsa = sample();
        let rev = fsa.reverse();
        let initial: Vec<_> = rev.initial().collect();
        assert_eq!(initial, vec![(&s(2), &Real(0.8))]);
        let finals: Vec<_> = rev.finals().collect();
        assert_eq!(finals, vec![(&s(0), &Real::one())]);
        assert_eq!(rev.arcs(&s(2), false).count(), 2);
        assert_eq!(rev.arcs(&s(0), false).count(), 0);
    }

    #[test]
    fn trim_drops_useless_states() {
        let mut fsa = sample();
        fsa.add_arc(7, "z", 0, None); // not accessible
        fsa.add_arc(1, "y", 8, None); // not co-accessible
        let trimmed = fsa.trim();
        assert_eq!(trimmed.num_states(), 3);
        assert_eq!(trimmed.arcs(&s(1), false).count(), 2);
        assert!(!trimmed.alphabet().contains(&Symbol::new("z")));
    }

    #[test]
    fn spawn_keeps_requested_weights() {
        let fsa = sample();
        let both = fsa.spawn(true, true);
        assert_eq!(both.initial().count(), 1);
        assert_eq!(both.finals().count(), 1);
        assert_eq!(both.num_arcs(), 0);
        let none = fsa.spawn(false, false);
        assert_eq!(none.num_states(), 0);
    }

    #[test]
    fn display_lists_arcs_and_weights() {
        let mut fsa: Fsa<Tropical> = Fsa::new();
        fsa.set_initial(0, None);
        fsa.add_arc(0, "a", 1, Tropical(2.0));
        fsa.set_final(1, Tropical(1.0));
        assert_eq!(fsa.to_string(), "0 -a/2-> 1\ninitial 0 / 0\nfinal 1 / 1\n");
    }
}
