//! Text rendering of transition tables.

use crate::automaton::Automaton;
use crate::automaton::dfa::Dfa;
use crate::automaton::nfa::Nfa;
use crate::automaton::state::StateId;
use std::fmt;

const MISSING: &str = "-";

/// A transition table view over any automaton.
///
/// Each row is prefixed with `->` for starting states and `<-` for final
/// states, followed by the state label and one cell per alphabet symbol.
pub struct TransitionTable<'a, A: ?Sized> {
    automaton: &'a A,
}

impl<'a, A: Automaton + ?Sized> TransitionTable<'a, A> {
    pub fn new(automaton: &'a A) -> Self {
        Self { automaton }
    }

    /// States that get a row, in id order.
    fn shown(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.automaton.num_states() as StateId)
            .filter(move |&state| !self.automaton.is_void(state))
    }

    fn rows(&self) -> Vec<(StateId, String, Vec<String>)> {
        let alphabet = self.automaton.alphabet();
        self.shown()
            .map(|state| {
                let cells = alphabet
                    .iter()
                    .map(|&symbol| {
                        self.automaton
                            .cell(state, symbol)
                            .unwrap_or_else(|| MISSING.to_owned())
                    })
                    .collect();
                (state, self.automaton.state_label(state), cells)
            })
            .collect()
    }

    fn listing(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        pick: impl Fn(StateId) -> bool,
    ) -> fmt::Result {
        let labels: Vec<String> = self
            .shown()
            .filter(|&state| pick(state))
            .map(|state| self.automaton.state_label(state))
            .collect();
        writeln!(f, "{title}: {}", labels.join(" "))
    }
}

impl<A: Automaton + ?Sized> fmt::Display for TransitionTable<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        let width = rows
            .iter()
            .flat_map(|(_, label, cells)| std::iter::once(label).chain(cells))
            .map(|text| text.chars().count())
            .chain(std::iter::once("State".len()))
            .max()
            .unwrap_or(0);

        write!(f, "{:4}|{:<width$}", "", "State")?;
        for symbol in self.automaton.alphabet() {
            write!(f, "|{:<width$}", symbol)?;
        }
        writeln!(f)?;

        for (state, label, cells) in &rows {
            let mut marker = String::new();
            if self.automaton.is_start(*state) {
                marker.push_str("->");
            }
            if self.automaton.is_final(*state) {
                marker.push_str("<-");
            }
            write!(f, "{marker:4}|{label:<width$}")?;
            for cell in cells {
                write!(f, "|{cell:<width$}")?;
            }
            writeln!(f)?;
        }

        self.listing(f, "starting states", |state| self.automaton.is_start(state))?;
        self.listing(f, "final states", |state| self.automaton.is_final(state))
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TransitionTable::new(self).fmt(f)
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TransitionTable::new(self).fmt(f)
    }
}
