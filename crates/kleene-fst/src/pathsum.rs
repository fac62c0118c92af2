// Pathsum: the semiring sum of the weights of all accepting paths.

use std::collections::VecDeque;

use hashbrown::HashMap;
use kleene_core::{Semiring, State, StrictOrder};
use tracing::debug;

use crate::FstError;
use crate::graph::Automaton;

/// How to evaluate a pathsum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// All-pairs closure (Lehmann's algorithm). Handles cycles through
    /// [`Semiring::star`](kleene_core::Semiring::star); cubic in the number of states.
    #[default]
    Lehmann,
    /// Forward accumulation in topological order. Linear, acyclic only.
    Viterbi,
}

/// Sum over every path from an initial to a final state of
/// `λ(i) ⊗ w(path) ⊗ ρ(f)`.
pub fn pathsum<A: Automaton>(automaton: &A, strategy: Strategy) -> Result<A::Weight, FstError> {
    let total = match strategy {
        Strategy::Lehmann => lehmann(automaton)?,
        Strategy::Viterbi => viterbi(automaton)?,
    };
    debug!(?strategy, %total, "computed pathsum");
    Ok(total)
}

/// Whether `actual` has the same pathsum as `expected`.
///
/// Comparison is only meaningful when the pathsum of `expected` is strictly
/// greater than `zero` on the raw score, with no tolerance; otherwise the
/// machines are reported as agreeing. In the Tropical semiring `zero` is
/// `+∞`, so the check always passes there.
/// The number of initial states is not compared.
pub fn pathsums_agree<A, B>(expected: &A, actual: &B) -> Result<bool, FstError>
where
    A: Automaton,
    B: Automaton<Weight = A::Weight>,
    A::Weight: StrictOrder,
{
    let lhs = pathsum(expected, Strategy::Lehmann)?;
    if !lhs.strictly_greater(&A::Weight::zero()) {
        return Ok(true);
    }
    let rhs = pathsum(actual, Strategy::Lehmann)?;
    Ok(lhs == rhs)
}

fn index<A: Automaton>(automaton: &A) -> (Vec<&State>, HashMap<&State, usize>) {
    let mut states: Vec<&State> = automaton.graph().states().collect();
    states.sort();
    let position = states.iter().enumerate().map(|(n, q)| (*q, n)).collect();
    (states, position)
}

fn lehmann<A: Automaton>(automaton: &A) -> Result<A::Weight, FstError> {
    let graph = automaton.graph();
    let (states, position) = index(automaton);
    let n = states.len();

    // `None` marks a pair with no path yet. Presence is structural so that
    // tolerant equality never discards a small partial sum.
    let mut m: Vec<Vec<Option<A::Weight>>> = vec![vec![None; n]; n];
    for (i, q) in states.iter().enumerate() {
        for (_, j, w) in graph.arcs(q) {
            let j = position[j];
            accumulate(&mut m[i][j], w.clone());
        }
    }

    for k in 0..n {
        // no cycle through k: the closure is one, and semirings without a
        // star stay usable
        let closure = match &m[k][k] {
            None => A::Weight::one(),
            Some(w) => w.star()?,
        };
        let mut next = m.clone();
        for i in 0..n {
            let Some(ik) = &m[i][k] else {
                continue;
            };
            let via = ik.multiply(&closure);
            for j in 0..n {
                if let Some(kj) = &m[k][j] {
                    accumulate(&mut next[i][j], via.multiply(kj));
                }
            }
        }
        m = next;
    }
    for (i, row) in m.iter_mut().enumerate() {
        accumulate(&mut row[i], A::Weight::one());
    }

    let mut total = A::Weight::zero();
    for (qi, lambda) in graph.initial() {
        let i = position[qi];
        for (qj, rho) in graph.finals() {
            let j = position[qj];
            if let Some(w) = &m[i][j] {
                total = total.add(&lambda.multiply(w).multiply(rho));
            }
        }
    }
    Ok(total)
}

fn accumulate<W: Semiring>(slot: &mut Option<W>, w: W) {
    *slot = Some(match slot.take() {
        Some(acc) => acc.add(&w),
        None => w,
    });
}

fn viterbi<A: Automaton>(automaton: &A) -> Result<A::Weight, FstError> {
    let graph = automaton.graph();
    let (states, position) = index(automaton);
    let n = states.len();

    let mut in_degree = vec![0usize; n];
    for q in &states {
        for (_, j, _) in graph.arcs(q) {
            in_degree[position[j]] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut alpha: Vec<A::Weight> = states.iter().map(|q| graph.initial_weight(q)).collect();
    let mut visited = 0;

    while let Some(i) = queue.pop_front() {
        visited += 1;
        for (_, j, w) in graph.arcs(states[i]) {
            let j = position[j];
            alpha[j] = alpha[j].add(&alpha[i].multiply(w));
            in_degree[j] -= 1;
            if in_degree[j] == 0 {
                queue.push_back(j);
            }
        }
    }
    if visited < n {
        return Err(FstError::Cyclic);
    }

    Ok(states
        .iter()
        .zip(&alpha)
        .fold(A::Weight::zero(), |total, (q, a)| {
            total.add(&a.multiply(&graph.final_weight(q)))
        }))
}
