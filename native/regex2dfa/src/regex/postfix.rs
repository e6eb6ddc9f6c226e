//! Regex normalization and infix-to-postfix compilation.
//!
//! The syntax is deliberately small: symbols, `(` `)`, `+` for alternation,
//! `*` for Kleene star and `.` for concatenation, which may be omitted.
//! Malformed input is not validated here; unbalanced parentheses simply
//! produce an unspecified operator order.

use crate::automaton::is_symbol;

/// Binding strength of an operator, or `None` for anything else.
fn precedence(c: char) -> Option<u8> {
    match c {
        '*' => Some(3),
        '.' => Some(2),
        '+' => Some(1),
        _ => None,
    }
}

/// Whether `c` can end an operand: a symbol, a closing group or a star.
fn ends_operand(c: char) -> bool {
    is_symbol(c) || c == ')' || c == '*'
}

/// Whether `c` can start an operand: a symbol or an opening group.
fn starts_operand(c: char) -> bool {
    is_symbol(c) || c == '('
}

/// Insert the explicit `.` operator between every pair of adjacent characters
/// that end and start an operand respectively.
pub fn insert_concatenation(regex: &str) -> String {
    let mut out = String::with_capacity(regex.len() * 2);
    let mut chars = regex.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if let Some(&next) = chars.peek() {
            if ends_operand(c) && starts_operand(next) {
                out.push('.');
            }
        }
    }
    out
}

/// Reorder an explicit-concatenation regex into postfix with the
/// shunting-yard algorithm. Parentheses never appear in the output.
pub fn to_postfix(regex: &str) -> String {
    let mut out = String::with_capacity(regex.len());
    let mut stack: Vec<char> = Vec::new();

    for c in regex.chars() {
        match c {
            '(' => stack.push(c),
            ')' => {
                while let Some(top) = stack.pop() {
                    if top == '(' {
                        break;
                    }
                    out.push(top);
                }
            }
            _ => match precedence(c) {
                Some(incoming) => {
                    while let Some(&top) = stack.last() {
                        match precedence(top) {
                            Some(p) if p >= incoming => {
                                out.push(top);
                                stack.pop();
                            }
                            _ => break,
                        }
                    }
                    stack.push(c);
                }
                None => out.push(c),
            },
        }
    }

    // Unmatched '(' are dropped
    out.extend(stack.into_iter().rev().filter(|&c| c != '('));
    out
}

/// Normalize a regex and compile it to postfix.
pub fn compile(regex: &str) -> String {
    to_postfix(&insert_concatenation(regex))
}
