//! Deterministic Finite Automaton (DFA) implementation.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use indexmap::IndexSet;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};

/// A DFA state and the set of NFA states it stands for.
///
/// Two `DfaState`s are equal iff their representative sets are equal; the
/// assigned id and the final flag take no part in equality or hashing.
#[derive(Debug, Clone)]
pub struct DfaState {
    representative: StateSet,
    accepting: bool,
}

impl DfaState {
    pub fn new(representative: StateSet) -> Self {
        Self {
            representative,
            accepting: false,
        }
    }

    /// The NFA states this DFA state denotes.
    pub fn representative(&self) -> &StateSet {
        &self.representative
    }

    pub fn is_final(&self) -> bool {
        self.accepting
    }

    pub(crate) fn set_final(&mut self, accepting: bool) {
        self.accepting = accepting;
    }
}

impl PartialEq for DfaState {
    fn eq(&self, other: &Self) -> bool {
        self.representative == other.representative
    }
}

impl Eq for DfaState {}

impl Hash for DfaState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.representative.hash(state);
    }
}

/// A Deterministic Finite Automaton produced by subset construction.
#[derive(Debug, Clone)]
pub struct Dfa {
    /// States indexed by id; id 0 is the start state
    states: Vec<DfaState>,
    /// Alphabet inherited from the source NFA
    alphabet: IndexSet<Symbol>,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, Symbol), StateId>,
    /// Final (accepting) states
    final_states: StateSet,
    /// Names of the source NFA's states, for labelling representative sets
    nfa_state_names: Vec<String>,
}

impl Dfa {
    /// The id reserved for the start state.
    pub const START: StateId = 0;

    pub(crate) fn new(alphabet: IndexSet<Symbol>, nfa_state_names: Vec<String>) -> Self {
        Self {
            states: Vec::new(),
            alphabet,
            transitions: HashMap::new(),
            final_states: StateSet::new(),
            nfa_state_names,
        }
    }

    /// Append a state and return its ID.
    pub(crate) fn add_state(&mut self, state: DfaState) -> StateId {
        let id = self.states.len() as StateId;
        if state.is_final() {
            self.final_states.insert(id);
        }
        self.states.push(state);
        id
    }

    pub(crate) fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        self.transitions.insert((source, symbol), destination);
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Get all states, indexed by id.
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    /// Get a state by id.
    pub fn state(&self, id: StateId) -> Option<&DfaState> {
        self.states.get(id as usize)
    }

    /// Get the start state.
    pub fn start_state(&self) -> StateId {
        Self::START
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> &IndexSet<Symbol> {
        &self.alphabet
    }

    /// Find the DFA state whose representative set equals `representative`.
    pub fn find_state(&self, representative: &StateSet) -> Option<StateId> {
        self.states
            .iter()
            .position(|state| state.representative() == representative)
            .map(|idx| idx as StateId)
    }

    /// Render a state's representative set with the source NFA's state names.
    pub fn representative_label(&self, id: StateId) -> String {
        let Some(state) = self.state(id) else {
            return String::from("{}");
        };
        let names: Vec<&str> = state
            .representative()
            .iter()
            .map(|nfa_state| {
                self.nfa_state_names
                    .get(nfa_state as usize)
                    .map_or("?", String::as_str)
            })
            .collect();
        format!("{{{}}}", names.join(", "))
    }

    /// Run the DFA over `input`. A missing transition rejects.
    pub fn accepts(&self, input: &str) -> bool {
        if self.states.is_empty() {
            return false;
        }
        let mut state = Self::START;
        for c in input.chars() {
            match self.transition(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.final_states.contains(state)
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        if self.states.is_empty() || self.final_states.is_empty() {
            return true;
        }

        // BFS to find if any final state is reachable
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut queue = VecDeque::from([Self::START]);

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }

            if self.final_states.contains(state) {
                return false;
            }

            for &symbol in &self.alphabet {
                if let Some(next) = self.transition(state, symbol) {
                    if !visited.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        true
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }
}
