// Weighted finite-state transducers.

use std::fmt;

use hashbrown::HashSet;
use kleene_core::{EPSILON, EPSILON_1, EPSILON_2, Semiring, State, Symbol};
use tracing::{debug, trace};

use crate::fsa::Fsa;
use crate::frozen::Frozen;
use crate::graph::{Automaton, WeightedGraph};
use crate::transition::Transition;

/// Which side of a composition a transducer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The left operand: its output tape meets the filter.
    First,
    /// The right operand: its input tape meets the filter.
    Second,
}

/// One tape of a transducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tape {
    Input,
    Output,
}

/// A weighted finite-state transducer `⟨Σ, Δ, Q, I, F, δ, λ, ρ⟩` over the
/// semiring `W`.
///
/// Arcs are keyed by `(input, output)` pairs; inputs are registered in `Σ`
/// and outputs in `Δ`.
#[derive(Debug, Clone)]
pub struct Fst<W> {
    sigma: HashSet<Symbol>,
    delta: HashSet<Symbol>,
    graph: WeightedGraph<(Symbol, Symbol), W>,
}

impl<W: Semiring> Default for Fst<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Semiring> Fst<W> {
    /// An empty transducer.
    pub fn new() -> Self {
        Self {
            sigma: HashSet::new(),
            delta: HashSet::new(),
            graph: WeightedGraph::new(),
        }
    }

    pub fn add_state(&mut self, q: impl Into<State>) {
        self.graph.add_state(q.into());
    }

    /// Add an arc `i -a:b/w-> j`, summing into any existing arc with the
    /// same endpoints and labels. `None` stands for `one`.
    pub fn add_arc(
        &mut self,
        i: impl Into<State>,
        a: impl Into<Symbol>,
        b: impl Into<Symbol>,
        j: impl Into<State>,
        w: impl Into<Option<W>>,
    ) {
        let label = self.register(a.into(), b.into());
        let w = w.into().unwrap_or_else(W::one);
        self.graph.add_arc(i.into(), label, j.into(), w);
    }

    /// Like [`add_arc`](Self::add_arc) but replaces the existing weight.
    pub fn set_arc(
        &mut self,
        i: impl Into<State>,
        a: impl Into<Symbol>,
        b: impl Into<Symbol>,
        j: impl Into<State>,
        w: impl Into<Option<W>>,
    ) {
        let label = self.register(a.into(), b.into());
        let w = w.into().unwrap_or_else(W::one);
        self.graph.set_arc(i.into(), label, j.into(), w);
    }

    fn register(&mut self, a: Symbol, b: Symbol) -> (Symbol, Symbol) {
        self.sigma.insert(a.clone());
        self.delta.insert(b.clone());
        (a, b)
    }

    pub fn set_initial(&mut self, q: impl Into<State>, w: impl Into<Option<W>>) {
        self.graph
            .set_initial(q.into(), w.into().unwrap_or_else(W::one));
    }

    pub fn set_final(&mut self, q: impl Into<State>, w: impl Into<Option<W>>) {
        self.graph
            .set_final(q.into(), w.into().unwrap_or_else(W::one));
    }

    /// Outgoing arcs of `i`, skipping zero weights and, with `no_eps`, arcs
    /// labeled `ε:ε`.
    pub fn arcs<'a>(
        &'a self,
        i: &State,
        no_eps: bool,
    ) -> impl Iterator<Item = Transition<'a, W>> + use<'a, W> {
        self.graph
            .arcs(i)
            .map(|((a, b), j, w)| Transition {
                input: a,
                output: b,
                target: j,
                weight: w,
            })
            .filter(move |t| !(no_eps && t.is_epsilon()))
    }

    pub fn input_alphabet(&self) -> &HashSet<Symbol> {
        &self.sigma
    }

    pub fn output_alphabet(&self) -> &HashSet<Symbol> {
        &self.delta
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

    /// `λ(q)`, or `zero` when `q` is not initial.
    pub fn initial_weight(&self, q: &State) -> W {
        self.graph.initial_weight(q)
    }

    /// `ρ(q)`, or `zero` when `q` is not final.
    pub fn final_weight(&self, q: &State) -> W {
        self.graph.final_weight(q)
    }

    pub fn accessible(&self) -> HashSet<State> {
        self.graph.accessible()
    }

    pub fn coaccessible(&self) -> HashSet<State> {
        self.graph.coaccessible()
    }

    /// Freeze into an immutable snapshot. The snapshot can be cloned cheaply
    /// and shared between threads; [`Frozen::thaw`] gives back a mutable copy.
    pub fn freeze(self) -> Frozen<Self> {
        Frozen::new(self)
    }

    /// An empty transducer in the same semiring, optionally carrying over the
    /// initial and final weights. Every structural transform starts here.
    pub fn spawn(&self, keep_init: bool, keep_final: bool) -> Self {
        let mut fst = Self::new();
        if keep_init {
            for (q, w) in self.initial() {
                fst.graph.set_initial(q.clone(), w.clone());
            }
        }
        if keep_final {
            for (q, w) in self.finals() {
                fst.graph.set_final(q.clone(), w.clone());
            }
        }
        fst
    }

    /// Flip every arc and swap the initial and final weights.
    pub fn reverse(&self) -> Self {
        let mut rev = self.spawn(false, false);
        for i in self.states() {
            rev.graph.add_state(i.clone());
            for t in self.arcs(i, false) {
                rev.add_arc(t.target, t.input, t.output, i, t.weight.clone());
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
            for t in self.arcs(i, false) {
                if useful.contains(t.target) {
                    trimmed.add_arc(i, t.input, t.output, t.target, t.weight.clone());
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
            "trimmed transducer"
        );
        trimmed
    }

    /// Relabel epsilons so that the transducer can take part in a filtered
    /// composition (Mohri, *Weighted Automata Algorithms*, fig. 7).
    ///
    /// - [`Operand::First`]: output `ε` becomes `ε₂`, and every state gets a
    ///   self-loop `ε:ε₁/1`.
    /// - [`Operand::Second`]: input `ε` becomes `ε₁`, and every state gets a
    ///   self-loop `ε₂:ε/1`.
    pub fn augment_epsilon_transitions(&self, operand: Operand) -> Self {
        let mut augmented = self.spawn(true, true);
        for q in self.states() {
            match operand {
                Operand::First => augmented.add_arc(q, EPSILON, EPSILON_1, q, W::one()),
                Operand::Second => augmented.add_arc(q, EPSILON_2, EPSILON, q, W::one()),
            }
            for t in self.arcs(q, false) {
                let (a, b) = match operand {
                    Operand::First if t.output.is_epsilon() => (t.input, &EPSILON_2),
                    Operand::Second if t.input.is_epsilon() => (&EPSILON_1, t.output),
                    _ => (t.input, t.output),
                };
                augmented.add_arc(q, a, b, t.target, t.weight.clone());
            }
        }
        trace!(?operand, states = augmented.num_states(), "augmented epsilons");
        augmented
    }

    /// Keep one tape, turning the transducer into an acceptor.
    pub fn project(&self, tape: Tape) -> Fsa<W> {
        let mut graph = WeightedGraph::new();
        let mut sigma = HashSet::new();
        for i in self.states() {
            graph.add_state(i.clone());
            for t in self.arcs(i, false) {
                let a = match tape {
                    Tape::Input => t.input,
                    Tape::Output => t.output,
                };
                sigma.insert(a.clone());
                graph.add_arc(i.clone(), a.clone(), t.target.clone(), t.weight.clone());
            }
        }
        for (q, w) in self.initial() {
            graph.set_initial(q.clone(), w.clone());
        }
        for (q, w) in self.finals() {
            graph.set_final(q.clone(), w.clone());
        }
        Fsa::from_parts(sigma, graph)
    }
}

impl<W: Semiring> Automaton for Fst<W> {
    type Label = (Symbol, Symbol);
    type Weight = W;

    fn graph(&self) -> &WeightedGraph<(Symbol, Symbol), W> {
        &self.graph
    }
}

impl<W: Semiring> fmt::Display for Fst<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states: Vec<&State> = self.states().collect();
        states.sort();
        for q in &states {
            let mut lines: Vec<String> = self
                .arcs(q, false)
                .map(|t| format!("{q} -{}:{}/{}-> {}", t.input, t.output, t.weight, t.target))
                .collect();
            lines.sort();
            for line in lines {
                writeln!(f, "{line}")?;
            }
        }
        for q in &states {
            let lambda = self.initial_weight(q);
            if !lambda.is_zero() {
                writeln!(f, "initial {q} / {lambda}")?;
            }
            let rho = self.final_weight(q);
            if !rho.is_zero() {
                writeln!(f, "final {q} / {rho}")?;
            }
        }
        Ok(())
    }
}
