//! Regex to NFA conversion.
//!
//! The pipeline runs in four stages:
//! 1. [`postfix::compile`] inserts explicit concatenation and reorders the
//!    regex into postfix notation.
//! 2. [`ExpressionNode::from_postfix`] builds the operator tree.
//! 3. [`ThompsonBuilder::construct`] applies Thompson's construction.
//! 4. [`materialize`] names the states and infers the final state.

pub mod materialize;
pub mod postfix;
pub mod thompson;
pub mod tree;

pub use materialize::{infer_final_states, materialize};
pub use thompson::{Fragment, ThompsonBuilder, ThompsonState};
pub use tree::ExpressionNode;

use crate::automaton::{EPSILON, Nfa, is_epsilon};
use crate::error::{Error, Result};
use tracing::debug;

/// Convert a regex into an NFA via Thompson's construction.
///
/// `+` is alternation, `*` is Kleene star, `.` is concatenation (optional)
/// and parentheses group. The epsilon marker `$` may not appear in `pattern`.
pub fn regex_to_nfa(pattern: &str) -> Result<Nfa> {
    if pattern.is_empty() {
        return Err(Error::EmptyPattern);
    }
    if let Some(position) = pattern.chars().position(is_epsilon) {
        return Err(Error::ReservedSymbol {
            symbol: EPSILON,
            position,
        });
    }

    let postfix = postfix::compile(pattern);
    debug!(pattern, postfix = %postfix, "compiled regex to postfix");

    let tree = ExpressionNode::from_postfix(&postfix)?;
    let mut builder = ThompsonBuilder::new();
    let fragment = builder.construct(&tree);
    debug!(
        nodes = tree.size(),
        states = builder.num_states(),
        "thompson construction finished"
    );

    let nfa = materialize(&builder, fragment);
    debug!(
        states = nfa.num_states(),
        symbols = nfa.alphabet().len(),
        "materialized nfa"
    );
    Ok(nfa)
}
