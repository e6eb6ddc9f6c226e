//! Non-deterministic Finite Automaton (NFA) implementation.
//!
//! Epsilon arcs are stored under the reserved [`EPSILON`] symbol alongside
//! ordinary symbols; nothing here treats them specially except
//! [`Nfa::epsilon_closure`].

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, Symbol};
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;

/// A single NFA state: a name plus its starting/final flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaState {
    name: String,
    starting: bool,
    accepting: bool,
}

impl NfaState {
    /// The human-readable name, e.g. `Q3`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_starting(&self) -> bool {
        self.starting
    }

    pub fn is_final(&self) -> bool {
        self.accepting
    }
}

/// A Non-deterministic Finite Automaton.
#[derive(Debug, Clone, Default)]
pub struct Nfa {
    /// States in discovery order; a state's index is its `StateId`.
    states: Vec<NfaState>,
    /// Symbols in the order they were first observed.
    alphabet: IndexSet<Symbol>,
    /// Transitions: (source, symbol) -> sorted, non-empty destination ids.
    /// Thompson NFAs have at most two destinations per arc, so these stay
    /// lists rather than bit sets sized by the whole automaton.
    transitions: IndexMap<(StateId, Symbol), Vec<StateId>>,
}

impl Nfa {
    /// Create a new empty NFA.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new state with the given name and return its ID.
    pub fn add_state(&mut self, name: impl Into<String>) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(NfaState {
            name: name.into(),
            starting: false,
            accepting: false,
        });
        id
    }

    /// Register a symbol in the alphabet without adding a transition.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.alphabet.insert(symbol);
    }

    /// Ensure a state exists, appending states named by their id if needed.
    fn ensure_state(&mut self, state: StateId) {
        while self.states.len() <= state as usize {
            let id = self.states.len();
            self.add_state(id.to_string());
        }
    }

    /// Add a transition from source to destination on the given symbol.
    ///
    /// States that do not exist yet are created.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        self.ensure_state(source);
        self.ensure_state(destination);

        self.alphabet.insert(symbol);
        let destinations = self.transitions.entry((source, symbol)).or_default();
        if let Err(idx) = destinations.binary_search(&destination) {
            destinations.insert(idx, destination);
        }
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, EPSILON, destination);
    }

    /// Mark a state as starting, creating it if needed.
    pub fn add_start_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.states[state as usize].starting = true;
    }

    /// Mark or unmark a state as final, creating it if needed.
    pub fn set_final(&mut self, state: StateId, accepting: bool) {
        self.ensure_state(state);
        self.states[state as usize].accepting = accepting;
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.set_final(state, true);
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Get all states in discovery order.
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    /// Get a state by ID.
    pub fn state(&self, id: StateId) -> Option<&NfaState> {
        self.states.get(id as usize)
    }

    /// Get the name of a state.
    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.state(id).map(NfaState::name)
    }

    /// Find a state by name.
    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|state| state.name == name)
            .map(|idx| idx as StateId)
    }

    /// Get the start states.
    pub fn start_states(&self) -> StateSet {
        self.flagged(NfaState::is_starting)
    }

    /// Get the final states.
    pub fn final_states(&self) -> StateSet {
        self.flagged(NfaState::is_final)
    }

    fn flagged(&self, flag: impl Fn(&NfaState) -> bool) -> StateSet {
        let mut set = StateSet::with_capacity(self.states.len());
        for (idx, state) in self.states.iter().enumerate() {
            if flag(state) {
                set.insert(idx as StateId);
            }
        }
        set
    }

    /// Get the alphabet, including the epsilon marker if any epsilon arc exists.
    pub fn alphabet(&self) -> &IndexSet<Symbol> {
        &self.alphabet
    }

    /// Get the destinations of a transition, if it exists.
    pub fn next_states(&self, source: StateId, symbol: Symbol) -> Option<&[StateId]> {
        self.transitions.get(&(source, symbol)).map(Vec::as_slice)
    }

    /// Get the states reachable from a set of states on a given symbol.
    ///
    /// Missing transitions contribute nothing. No epsilon closure is taken.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        let mut reached = StateSet::with_capacity(self.states.len());

        for state in states.iter() {
            if let Some(destinations) = self.next_states(state, symbol) {
                reached.extend(destinations.iter().copied());
            }
        }

        reached
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }

            if let Some(destinations) = self.next_states(s, EPSILON) {
                for &dest in destinations {
                    if !closure.contains(dest) {
                        stack.push(dest);
                    }
                }
            }
        }

        closure
    }

    /// Get all states reachable from the start states along any arc.
    pub fn reachable_states(&self) -> StateSet {
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut queue: VecDeque<StateId> = self.start_states().iter().collect();

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }
            for &symbol in &self.alphabet {
                if let Some(destinations) = self.next_states(state, symbol) {
                    queue.extend(destinations.iter().filter(|&&dest| !visited.contains(dest)));
                }
            }
        }

        visited
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |&dst| (src, sym, dst)))
    }

    /// Get every (symbol, destinations) pair leaving a state.
    pub fn outgoing(&self, source: StateId) -> impl Iterator<Item = (Symbol, &[StateId])> + '_ {
        self.transitions
            .iter()
            .filter(move |((src, _), _)| *src == source)
            .map(|(&(_, sym), dests)| (sym, dests.as_slice()))
    }
}
