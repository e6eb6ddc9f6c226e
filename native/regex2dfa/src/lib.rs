//! Regular expressions to NFAs via Thompson's construction, and NFAs to DFAs
//! via subset construction.
//!
//! ```
//! use regex2dfa::{regex_to_nfa, subset_construction};
//!
//! let nfa = regex_to_nfa("a*a(bb)*").unwrap();
//! let dfa = subset_construction(&nfa);
//! assert_eq!(dfa.state(0).unwrap().representative(), &nfa.start_states());
//! ```

pub mod automaton;
pub mod error;
pub mod regex;

pub use automaton::{
    Automaton, Dfa, DfaState, EPSILON, Nfa, NfaDescription, NfaState, RegexDescription, StateId,
    StateSet, SubsetOptions, Symbol, TransitionTable, subset_construction,
    subset_construction_with,
};
pub use error::{Error, Result};
pub use regex::regex_to_nfa;

/// Convert a regex straight to a DFA.
pub fn regex_to_dfa(pattern: &str, options: &SubsetOptions) -> Result<Dfa> {
    let nfa = regex_to_nfa(pattern)?;
    Ok(subset_construction_with(&nfa, options))
}

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn regex2dfa(m: &Bound<'_, PyModule>) -> PyResult<()> {
    automaton::automaton(m)
}
