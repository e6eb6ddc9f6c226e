//! Finite automata and the NFA to DFA conversion.
//!
//! This module provides NFA and DFA implementations with:
//! - Bit-set state sets with structural equality
//! - Subset construction (NFA to DFA conversion), optionally epsilon-closing
//! - JSON automaton descriptions and transition-table rendering
//! - PyO3 bindings for Python interoperability (`python` feature)

mod description;
mod dfa;
mod nfa;
#[cfg(feature = "python")]
mod python_bindings;
mod state;
mod subset_construction;
mod symbol;
mod table;

pub use description::{NfaDescription, RegexDescription};
pub use dfa::{Dfa, DfaState};
pub use nfa::{Nfa, NfaState};
#[cfg(feature = "python")]
pub use python_bindings::automaton;
pub use state::{StateId, StateSet};
pub use subset_construction::{SubsetOptions, subset_construction, subset_construction_with};
pub use symbol::{EPSILON, METACHARACTERS, Symbol, is_epsilon, is_metacharacter, is_symbol};
pub use table::TransitionTable;

use indexmap::IndexSet;

/// Queries shared by NFAs and DFAs.
pub trait Automaton {
    /// Symbols in their declared order.
    fn alphabet(&self) -> &IndexSet<Symbol>;

    fn num_states(&self) -> usize;

    fn is_start(&self, state: StateId) -> bool;

    fn is_final(&self, state: StateId) -> bool;

    /// Human-readable row label for a state.
    fn state_label(&self, state: StateId) -> String;

    /// Human-readable destination of `(state, symbol)`, or `None` if there is
    /// no transition.
    fn cell(&self, state: StateId, symbol: Symbol) -> Option<String>;

    /// Whether a state stands for no underlying states. Tables leave such
    /// states out.
    fn is_void(&self, _state: StateId) -> bool {
        false
    }
}

impl Automaton for Nfa {
    fn alphabet(&self) -> &IndexSet<Symbol> {
        Nfa::alphabet(self)
    }

    fn num_states(&self) -> usize {
        Nfa::num_states(self)
    }

    fn is_start(&self, state: StateId) -> bool {
        self.state(state).is_some_and(NfaState::is_starting)
    }

    fn is_final(&self, state: StateId) -> bool {
        self.state(state).is_some_and(NfaState::is_final)
    }

    fn state_label(&self, state: StateId) -> String {
        self.state_name(state).unwrap_or_default().to_owned()
    }

    fn cell(&self, state: StateId, symbol: Symbol) -> Option<String> {
        let destinations = self.next_states(state, symbol)?;
        let names: Vec<&str> = destinations
            .iter()
            .filter_map(|&dest| self.state_name(dest))
            .collect();
        Some(format!("{{{}}}", names.join(", ")))
    }
}

impl Automaton for Dfa {
    fn alphabet(&self) -> &IndexSet<Symbol> {
        Dfa::alphabet(self)
    }

    fn num_states(&self) -> usize {
        Dfa::num_states(self)
    }

    fn is_start(&self, state: StateId) -> bool {
        state == self.start_state() && (state as usize) < Dfa::num_states(self)
    }

    fn is_final(&self, state: StateId) -> bool {
        self.final_states().contains(state)
    }

    fn state_label(&self, state: StateId) -> String {
        format!("{state} {}", self.representative_label(state))
    }

    fn cell(&self, state: StateId, symbol: Symbol) -> Option<String> {
        self.transition(state, symbol).map(|dest| dest.to_string())
    }

    fn is_void(&self, state: StateId) -> bool {
        self.state(state)
            .is_some_and(|s| s.representative().is_empty())
    }
}
