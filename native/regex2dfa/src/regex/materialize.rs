//! Flattening a Thompson fragment graph into an [`Nfa`].

use crate::automaton::{Nfa, StateId, StateSet};
use crate::regex::thompson::{Fragment, ThompsonBuilder};

/// Traverse the fragment graph from `fragment.entry` and build the NFA.
///
/// The entry state becomes the starting state `Q1`; every other state is named
/// `Q<n>` in the order it is first seen as an arc target. NFA state ids follow
/// the same order, so `Q<n>` has id `n - 1`. Final states are inferred
/// afterwards with [`infer_final_states`].
pub fn materialize(builder: &ThompsonBuilder, fragment: Fragment) -> Nfa {
    let mut nfa = Nfa::new();
    // Construction state id -> NFA state id, once named
    let mut named: Vec<Option<StateId>> = vec![None; builder.num_states()];
    let mut visited = StateSet::with_capacity(builder.num_states());

    let start = nfa.add_state("Q1");
    nfa.add_start_state(start);
    named[fragment.entry as usize] = Some(start);

    let mut stack = vec![fragment.entry];
    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        let (Some(source), Some(state)) = (named[current as usize], builder.state(current)) else {
            continue;
        };

        let mut successors = Vec::new();
        for (symbol, targets) in state.arcs() {
            nfa.add_symbol(symbol);
            for &target in targets {
                let destination = *named[target as usize].get_or_insert_with(|| {
                    let name = format!("Q{}", nfa.num_states() + 1);
                    nfa.add_state(name)
                });
                nfa.add_transition(source, symbol, destination);
                successors.push(target);
            }
        }
        // Depth-first, visiting successors in arc order
        stack.extend(successors.into_iter().rev());
    }

    infer_final_states(&mut nfa);
    nfa
}

/// Mark a state final iff none of its transitions leave it and it has at most
/// one self-transition.
///
/// In a Thompson NFA every state except the overall exit has an arc to some
/// other state, so this singles out the exit without extra bookkeeping.
pub fn infer_final_states(nfa: &mut Nfa) {
    let mut self_loops = vec![0usize; nfa.num_states()];
    let mut leaves = vec![false; nfa.num_states()];
    for (source, _, destination) in nfa.transitions() {
        if source == destination {
            self_loops[source as usize] += 1;
        } else {
            leaves[source as usize] = true;
        }
    }

    for (id, (loops, leaves)) in self_loops.into_iter().zip(leaves).enumerate() {
        nfa.set_final(id as StateId, !leaves && loops <= 1);
    }
}
