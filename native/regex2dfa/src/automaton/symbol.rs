//! Symbol types for automata transitions.

/// A single input character labelling a transition.
pub type Symbol = char;

/// Reserved symbol marking epsilon (empty) transitions.
///
/// Epsilon arcs live in the same transition relation as ordinary symbols;
/// only the subset construction's optional closure pass treats them specially.
pub const EPSILON: Symbol = '$';

/// Operator characters of the regex syntax: grouping, alternation (`+`),
/// explicit concatenation (`.`) and Kleene star.
pub const METACHARACTERS: [Symbol; 5] = ['(', ')', '+', '.', '*'];

/// Check if a symbol is the epsilon marker.
#[inline]
pub fn is_epsilon(symbol: Symbol) -> bool {
    symbol == EPSILON
}

/// Check if a character is one of the regex operators or parentheses.
#[inline]
pub fn is_metacharacter(c: char) -> bool {
    METACHARACTERS.contains(&c)
}

/// Check if a character is an ordinary input symbol.
#[inline]
pub fn is_symbol(c: char) -> bool {
    !is_metacharacter(c) && !is_epsilon(c)
}
