//! Subset construction algorithm for converting an NFA to a DFA.

use crate::automaton::dfa::{Dfa, DfaState};
use crate::automaton::nfa::Nfa;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Symbol, is_epsilon};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Knobs for [`subset_construction_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsetOptions {
    /// Close the start set and every move result over epsilon arcs, and drop
    /// the epsilon marker from the DFA alphabet. Off by default: epsilon arcs
    /// are then matched literally like any other symbol.
    pub epsilon_closure: bool,
}

/// Convert an NFA to a DFA using the powerset construction algorithm, without
/// epsilon closure.
pub fn subset_construction(nfa: &Nfa) -> Dfa {
    subset_construction_with(nfa, &SubsetOptions::default())
}

/// Convert an NFA to a DFA using the powerset construction algorithm.
///
/// DFA states are discovered breadth-first from the NFA's start set. Empty
/// move results are not materialized: the DFA simply has no transition there.
pub fn subset_construction_with(nfa: &Nfa, options: &SubsetOptions) -> Dfa {
    let alphabet: IndexSet<Symbol> = nfa
        .alphabet()
        .iter()
        .copied()
        .filter(|&symbol| !(options.epsilon_closure && is_epsilon(symbol)))
        .collect();
    let close = |set: StateSet| {
        if options.epsilon_closure {
            nfa.epsilon_closure(&set)
        } else {
            set
        }
    };

    // Representative sets in discovery order; the index is the provisional id
    let mut visited: IndexSet<StateSet> = IndexSet::new();
    let mut pending: Vec<(usize, Symbol, usize)> = Vec::new();
    let mut worklist: VecDeque<usize> = VecDeque::new();

    let (start, _) = visited.insert_full(close(nfa.start_states()));
    worklist.push_back(start);

    while let Some(current) = worklist.pop_front() {
        let current_set = visited[current].clone();
        if current_set.is_empty() {
            continue;
        }
        trace!(state = current, nfa_states = ?current_set, "exploring representative set");

        for &symbol in &alphabet {
            let next_set = close(nfa.move_on_symbol(&current_set, symbol));
            if next_set.is_empty() {
                continue;
            }

            let (next, is_new) = visited.insert_full(next_set);
            if is_new {
                worklist.push_back(next);
            }
            pending.push((current, symbol, next));
        }
    }

    let dfa = rename(nfa, alphabet, visited, start, &pending);
    debug!(
        nfa_states = nfa.num_states(),
        dfa_states = dfa.num_states(),
        final_states = dfa.final_states().len(),
        "subset construction finished"
    );
    dfa
}

/// Assign `Dfa::START` to the start set and sequential ids to every other set
/// in discovery order, then rewrite transitions and finality through that map.
fn rename(
    nfa: &Nfa,
    alphabet: IndexSet<Symbol>,
    visited: IndexSet<StateSet>,
    start: usize,
    pending: &[(usize, Symbol, usize)],
) -> Dfa {
    let nfa_final_states = nfa.final_states();
    let names = nfa.states().iter().map(|s| s.name().to_owned()).collect();

    let mut ids: Vec<StateId> = vec![Dfa::START; visited.len()];
    let mut next_id = Dfa::START + 1;
    for (idx, id) in ids.iter_mut().enumerate() {
        if idx != start {
            *id = next_id;
            next_id += 1;
        }
    }

    let mut ordered: Vec<Option<StateSet>> = vec![None; visited.len()];
    for (idx, set) in visited.into_iter().enumerate() {
        ordered[ids[idx] as usize] = Some(set);
    }

    let mut dfa = Dfa::new(alphabet, names);
    for set in ordered.into_iter().flatten() {
        let mut state = DfaState::new(set);
        state.set_final(state.representative().intersects(&nfa_final_states));
        dfa.add_state(state);
    }
    for &(source, symbol, destination) in pending {
        dfa.add_transition(ids[source], symbol, ids[destination]);
    }

    dfa
}
