//! PyO3 bindings for the automaton module.

use crate::automaton::dfa::Dfa as RustDfa;
use crate::automaton::nfa::Nfa as RustNfa;
use crate::automaton::subset_construction::{SubsetOptions, subset_construction_with};
use crate::regex::regex_to_nfa;
use pyo3::prelude::*;
use pyo3::types::PySet;

/// A Non-deterministic Finite Automaton.
#[pyclass(name = "Nfa", module = "regex2dfa")]
pub struct PyNfa {
    /// The underlying Rust NFA
    nfa: RustNfa,
}

#[pymethods]
impl PyNfa {
    /// Build an NFA from a regex via Thompson's construction.
    #[staticmethod]
    fn from_regex(pattern: &str) -> PyResult<Self> {
        Ok(Self {
            nfa: regex_to_nfa(pattern)?,
        })
    }

    /// Build an NFA from a JSON description.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        Ok(Self {
            nfa: RustNfa::from_json(json)?,
        })
    }

    /// Convert to a DFA via subset construction.
    #[pyo3(signature = (epsilon_closure = false))]
    fn to_dfa(&self, epsilon_closure: bool) -> PyDfa {
        let options = SubsetOptions { epsilon_closure };
        PyDfa {
            dfa: subset_construction_with(&self.nfa, &options),
        }
    }

    #[getter]
    fn num_states(&self) -> usize {
        self.nfa.num_states()
    }

    /// The alphabet as a list of one-character strings.
    #[getter]
    fn alphabet(&self) -> Vec<String> {
        self.nfa.alphabet().iter().map(char::to_string).collect()
    }

    fn __str__(&self) -> String {
        self.nfa.to_string()
    }
}

/// A Deterministic Finite Automaton.
#[pyclass(name = "Dfa", module = "regex2dfa")]
pub struct PyDfa {
    /// The underlying Rust DFA
    dfa: RustDfa,
}

#[pymethods]
impl PyDfa {
    /// Get the start state as an integer index.
    #[getter]
    fn start_state(&self) -> u32 {
        self.dfa.start_state()
    }

    /// Get the final states as a set of integer indices.
    #[getter]
    fn final_states(&self, py: Python<'_>) -> PyResult<Py<PySet>> {
        let set = PySet::empty(py)?;
        for state in self.dfa.final_states().iter() {
            set.add(state)?;
        }
        Ok(set.unbind())
    }

    #[getter]
    fn num_states(&self) -> usize {
        self.dfa.num_states()
    }

    /// Run the DFA over a string.
    fn accepts(&self, input: &str) -> bool {
        self.dfa.accepts(input)
    }

    /// Check if the DFA's language is empty.
    fn is_empty(&self) -> bool {
        self.dfa.is_empty()
    }

    fn __str__(&self) -> String {
        self.dfa.to_string()
    }
}

/// Register the automaton classes.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyNfa>()?;
    m.add_class::<PyDfa>()?;
    Ok(())
}
