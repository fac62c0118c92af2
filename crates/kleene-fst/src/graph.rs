// State and arc tables shared by acceptors and transducers.

use std::collections::VecDeque;
use std::hash::Hash;

use hashbrown::{HashMap, HashSet};
use kleene_core::{Semiring, State, Symbol};

/// An arc label: a single symbol for acceptors, an input/output pair for
/// transducers.
pub trait Label: Clone + Eq + Hash + std::fmt::Debug {
    /// Whether the label consumes nothing on any tape.
    fn is_epsilon(&self) -> bool;
}

impl Label for Symbol {
    fn is_epsilon(&self) -> bool {
        Symbol::is_epsilon(self)
    }
}

impl Label for (Symbol, Symbol) {
    fn is_epsilon(&self) -> bool {
        self.0.is_epsilon() && self.1.is_epsilon()
    }
}

/// Anything that exposes a weighted graph: acceptors, transducers and their
/// frozen snapshots.
pub trait Automaton {
    type Label: Label;
    type Weight: Semiring;

    fn graph(&self) -> &WeightedGraph<Self::Label, Self::Weight>;
}

/// The states `Q`, transitions `δ`, initial weights `λ` and final weights `ρ`
/// of a weighted machine.
///
/// `δ` maps a source state to a label to a destination to a weight, so
/// parallel arcs with the same label and endpoints share a single entry.
/// Every state mentioned in `δ`, `λ` or `ρ` is in `Q`.
#[derive(Debug, Clone)]
pub struct WeightedGraph<L, W> {
    states: HashSet<State>,
    delta: HashMap<State, HashMap<L, HashMap<State, W>>>,
    initial: HashMap<State, W>,
    finals: HashMap<State, W>,
}

impl<L, W> Default for WeightedGraph<L, W> {
    fn default() -> Self {
        Self {
            states: HashSet::new(),
            delta: HashMap::new(),
            initial: HashMap::new(),
            finals: HashMap::new(),
        }
    }
}

impl<L: Label, W: Semiring> WeightedGraph<L, W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a state. Returns `false` if it was already present.
    pub fn add_state(&mut self, q: State) -> bool {
        self.states.insert(q)
    }

    pub fn contains(&self, q: &State) -> bool {
        self.states.contains(q)
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.iter()
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Number of stored arcs with a non-zero weight.
    pub fn num_arcs(&self) -> usize {
        self.delta
            .values()
            .flat_map(HashMap::values)
            .flat_map(HashMap::values)
            .filter(|w| !w.is_zero())
            .count()
    }

    /// Add `w` into the arc `(i, label, j)`, creating it if absent.
    pub fn add_arc(&mut self, i: State, label: L, j: State, w: W) {
        self.states.insert(i.clone());
        self.states.insert(j.clone());
        let slot = self
            .delta
            .entry(i)
            .or_default()
            .entry(label)
            .or_default()
            .entry(j)
            .or_insert_with(W::zero);
        *slot = slot.add(&w);
    }

    /// Overwrite the weight of the arc `(i, label, j)`.
    pub fn set_arc(&mut self, i: State, label: L, j: State, w: W) {
        self.states.insert(i.clone());
        self.states.insert(j.clone());
        self.delta
            .entry(i)
            .or_default()
            .entry(label)
            .or_default()
            .insert(j, w);
    }

    pub fn set_initial(&mut self, q: State, w: W) {
        self.states.insert(q.clone());
        self.initial.insert(q, w);
    }

    pub fn set_final(&mut self, q: State, w: W) {
        self.states.insert(q.clone());
        self.finals.insert(q, w);
    }

    /// Initial states with their non-zero weights.
    pub fn initial(&self) -> impl Iterator<Item = (&State, &W)> {
        self.initial.iter().filter(|(_, w)| !w.is_zero())
    }

    /// Final states with their non-zero weights.
    pub fn finals(&self) -> impl Iterator<Item = (&State, &W)> {
        self.finals.iter().filter(|(_, w)| !w.is_zero())
    }

    pub fn initial_weight(&self, q: &State) -> W {
        self.initial.get(q).cloned().unwrap_or_else(W::zero)
    }

    pub fn final_weight(&self, q: &State) -> W {
        self.finals.get(q).cloned().unwrap_or_else(W::zero)
    }

    /// Outgoing arcs of `i` with a non-zero weight.
    ///
    /// The iterator is lazy and borrows the graph; calling `arcs` again
    /// re-enumerates the current contents.
    pub fn arcs<'a>(&'a self, i: &State) -> impl Iterator<Item = (&'a L, &'a State, &'a W)> + use<'a, L, W> {
        self.delta
            .get(i)
            .into_iter()
            .flat_map(|by_label| {
                by_label
                    .iter()
                    .flat_map(|(label, dests)| dests.iter().map(move |(j, w)| (label, j, w)))
            })
            .filter(|(_, _, w)| !w.is_zero())
    }

    /// States reachable from an initial state.
    pub fn accessible(&self) -> HashSet<State> {
        let mut seen: HashSet<State> = HashSet::new();
        let mut queue: VecDeque<&State> = VecDeque::new();
        for (q, _) in self.initial() {
            if seen.insert(q.clone()) {
                queue.push_back(q);
            }
        }
        while let Some(i) = queue.pop_front() {
            for (_, j, _) in self.arcs(i) {
                if seen.insert(j.clone()) {
                    queue.push_back(j);
                }
            }
        }
        seen
    }

    /// States from which a final state is reachable.
    pub fn coaccessible(&self) -> HashSet<State> {
        let mut predecessors: HashMap<&State, Vec<&State>> = HashMap::new();
        for i in &self.states {
            for (_, j, _) in self.arcs(i) {
                predecessors.entry(j).or_default().push(i);
            }
        }

        let mut seen: HashSet<State> = HashSet::new();
        let mut queue: VecDeque<&State> = VecDeque::new();
        for (q, _) in self.finals() {
            if seen.insert(q.clone()) {
                queue.push_back(q);
            }
        }
        while let Some(j) = queue.pop_front() {
            for &i in predecessors.get(j).into_iter().flatten() {
                if seen.insert(i.clone()) {
                    queue.push_back(i);
                }
            }
        }
        seen
    }

    /// States that are both accessible and co-accessible.
    pub fn useful(&self) -> HashSet<State> {
        let accessible = self.accessible();
        let coaccessible = self.coaccessible();
        accessible.intersection(&coaccessible).cloned().collect()
    }
}
