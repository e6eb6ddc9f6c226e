//! Serialized automaton and regex descriptions.
//!
//! The JSON shape matches the tool's input files:
//!
//! ```json
//! {
//!   "states": ["0", "1"],
//!   "alphabet": ["a"],
//!   "transition_function": [["0", "a", "1"]],
//!   "start_states": ["0"],
//!   "final_states": ["1"]
//! }
//! ```

use crate::automaton::nfa::Nfa;
use crate::automaton::state::StateId;
use crate::automaton::symbol::Symbol;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An NFA as described by an external file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfaDescription {
    pub states: Vec<String>,
    pub alphabet: Vec<String>,
    /// `[from, symbol, to]` triples.
    pub transition_function: Vec<(String, String, String)>,
    pub start_states: Vec<String>,
    pub final_states: Vec<String>,
}

impl NfaDescription {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A regex as described by an external file: `{"regex": "a*b"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexDescription {
    pub regex: String,
}

impl RegexDescription {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn parse_symbol(symbol: &str) -> Result<Symbol> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::InvalidSymbol {
            symbol: symbol.to_owned(),
        }),
    }
}

impl TryFrom<&NfaDescription> for Nfa {
    type Error = Error;

    fn try_from(desc: &NfaDescription) -> Result<Self> {
        let mut nfa = Nfa::new();
        let mut ids: IndexMap<&str, StateId> = IndexMap::with_capacity(desc.states.len());
        for name in &desc.states {
            if !ids.contains_key(name.as_str()) {
                ids.insert(name.as_str(), nfa.add_state(name.as_str()));
            }
        }
        let lookup = |name: &str| {
            ids.get(name).copied().ok_or_else(|| Error::UnknownState {
                name: name.to_owned(),
            })
        };

        // Declared alphabet order wins over order of first use
        for symbol in &desc.alphabet {
            nfa.add_symbol(parse_symbol(symbol)?);
        }
        for (from, symbol, to) in &desc.transition_function {
            let source = lookup(from.as_str())?;
            let destination = lookup(to.as_str())?;
            nfa.add_transition(source, parse_symbol(symbol)?, destination);
        }
        for name in &desc.start_states {
            nfa.add_start_state(lookup(name.as_str())?);
        }
        for name in &desc.final_states {
            nfa.add_final_state(lookup(name.as_str())?);
        }

        Ok(nfa)
    }
}

impl Nfa {
    /// Build an NFA from an external description.
    pub fn from_description(desc: &NfaDescription) -> Result<Self> {
        Self::try_from(desc)
    }

    /// Parse a JSON description and build the NFA it describes.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_description(&NfaDescription::from_json(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_STATES: &str = r#"{
        "states": ["0", "1", "2", "3"],
        "alphabet": ["a", "b"],
        "transition_function": [
            ["0", "a", "1"], ["0", "b", "0"],
            ["1", "a", "1"], ["1", "a", "2"], ["1", "b", "2"],
            ["2", "a", "3"], ["3", "b", "3"]
        ],
        "start_states": ["0"],
        "final_states": ["2", "3"]
    }"#;

    #[test]
    fn test_parse_nfa() {
        let nfa = Nfa::from_json(FOUR_STATES).unwrap();

        assert_eq!(nfa.num_states(), 4);
        assert_eq!(nfa.alphabet().iter().copied().collect::<Vec<_>>(), vec!['a', 'b']);
        assert_eq!(nfa.start_states().to_vec(), vec![0]);
        assert_eq!(nfa.final_states().to_vec(), vec![2, 3]);
        assert_eq!(nfa.next_states(1, 'a').map(|s| s.to_vec()), Some(vec![1, 2]));
    }

    #[test]
    fn test_declared_alphabet_order() {
        let desc = NfaDescription {
            states: vec!["p".into(), "q".into()],
            alphabet: vec!["b".into(), "a".into()],
            transition_function: vec![("p".into(), "a".into(), "q".into())],
            start_states: vec!["p".into()],
            final_states: vec!["q".into()],
        };
        let nfa = Nfa::from_description(&desc).unwrap();
        assert_eq!(nfa.alphabet().iter().copied().collect::<Vec<_>>(), vec!['b', 'a']);
    }

    #[test]
    fn test_unknown_state() {
        let desc = NfaDescription {
            states: vec!["p".into()],
            alphabet: vec!["a".into()],
            transition_function: vec![("p".into(), "a".into(), "r".into())],
            ..Default::default()
        };
        let err = Nfa::from_description(&desc).unwrap_err();
        assert!(matches!(err, Error::UnknownState { ref name } if name == "r"));
    }

    #[test]
    fn test_invalid_symbol() {
        let desc = NfaDescription {
            states: vec!["p".into()],
            alphabet: vec!["ab".into()],
            ..Default::default()
        };
        let err = Nfa::from_description(&desc).unwrap_err();
        assert!(matches!(err, Error::InvalidSymbol { ref symbol } if symbol == "ab"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            NfaDescription::from_json(r#"{"states": 3}"#),
            Err(Error::Json(_))
        ));
        assert!(RegexDescription::from_json("{}").is_err());
        assert_eq!(
            RegexDescription::from_json(r#"{"regex": "a*b"}"#).unwrap().regex,
            "a*b"
        );
    }
}
