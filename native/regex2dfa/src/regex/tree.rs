//! Expression trees built from postfix regexes.

use crate::automaton::{EPSILON, Symbol};
use crate::error::{Error, Result};
use std::fmt;

/// A node of a regex expression tree. Each node owns its children.
///
/// A literal of `n` symbols is a left-leaning `Concat` chain `n` levels deep,
/// so walks over the tree (construction, size, display and drop) keep their
/// own work stack instead of recursing.
#[derive(Debug, PartialEq, Eq)]
pub enum ExpressionNode {
    Symbol(Symbol),
    Concat(Box<ExpressionNode>, Box<ExpressionNode>),
    Union(Box<ExpressionNode>, Box<ExpressionNode>),
    Kleene(Box<ExpressionNode>),
}

impl ExpressionNode {
    pub fn concat(left: ExpressionNode, right: ExpressionNode) -> Self {
        Self::Concat(Box::new(left), Box::new(right))
    }

    pub fn union(left: ExpressionNode, right: ExpressionNode) -> Self {
        Self::Union(Box::new(left), Box::new(right))
    }

    pub fn kleene(operand: ExpressionNode) -> Self {
        Self::Kleene(Box::new(operand))
    }

    /// Build a tree from a postfix regex in a single left-to-right scan.
    ///
    /// For binary operators the first node popped becomes the right child.
    /// Parentheses are skipped.
    pub fn from_postfix(postfix: &str) -> Result<Self> {
        let mut stack: Vec<ExpressionNode> = Vec::new();

        for (position, c) in postfix.chars().enumerate() {
            let missing = || Error::MissingOperand {
                operator: c,
                position,
            };
            match c {
                '+' | '.' => {
                    let right = stack.pop().ok_or_else(missing)?;
                    let left = stack.pop().ok_or_else(missing)?;
                    stack.push(if c == '+' {
                        Self::union(left, right)
                    } else {
                        Self::concat(left, right)
                    });
                }
                '*' => {
                    let operand = stack.pop().ok_or_else(missing)?;
                    stack.push(Self::kleene(operand));
                }
                '(' | ')' => {}
                _ => stack.push(Self::Symbol(c)),
            }
        }

        let root = stack.pop().ok_or(Error::EmptyPattern)?;
        if !stack.is_empty() {
            return Err(Error::DanglingOperands {
                count: stack.len() + 1,
            });
        }
        Ok(root)
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            match node {
                Self::Symbol(_) => {}
                Self::Kleene(operand) => stack.push(operand),
                Self::Concat(left, right) | Self::Union(left, right) => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }

    /// Move the children out, leaving leaves behind.
    fn detach_children(&mut self, out: &mut Vec<ExpressionNode>) {
        let mut detach = |child: &mut Box<ExpressionNode>| {
            out.push(std::mem::replace(child.as_mut(), Self::Symbol(EPSILON)));
        };
        match self {
            Self::Symbol(_) => {}
            Self::Kleene(operand) => detach(operand),
            Self::Concat(left, right) | Self::Union(left, right) => {
                detach(left);
                detach(right);
            }
        }
    }
}

impl Drop for ExpressionNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

enum Piece<'a> {
    Node(&'a ExpressionNode),
    Text(&'static str),
}

impl fmt::Display for ExpressionNode {
    /// Fully parenthesized infix form, e.g. `((a+b)*.c)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Node(self)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(Self::Symbol(c)) => write!(f, "{c}")?,
                Piece::Node(Self::Kleene(operand)) => {
                    stack.push(Piece::Text("*"));
                    stack.push(Piece::Node(operand));
                }
                Piece::Node(Self::Concat(left, right)) => {
                    f.write_str("(")?;
                    stack.extend([
                        Piece::Text(")"),
                        Piece::Node(right),
                        Piece::Text("."),
                        Piece::Node(left),
                    ]);
                }
                Piece::Node(Self::Union(left, right)) => {
                    f.write_str("(")?;
                    stack.extend([
                        Piece::Text(")"),
                        Piece::Node(right),
                        Piece::Text("+"),
                        Piece::Node(left),
                    ]);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::postfix;
    use crate::regex::testing::WellFormed;
    use quickcheck::QuickCheck;

    #[test]
    fn test_symbol() {
        assert_eq!(ExpressionNode::from_postfix("a").unwrap(), ExpressionNode::Symbol('a'));
    }

    #[test]
    fn test_operand_order() {
        let tree = ExpressionNode::from_postfix("ab.c+").unwrap();
        let expected = ExpressionNode::union(
            ExpressionNode::concat(ExpressionNode::Symbol('a'), ExpressionNode::Symbol('b')),
            ExpressionNode::Symbol('c'),
        );
        assert_eq!(tree, expected);
        assert_eq!(tree.to_string(), "((a.b)+c)");
        assert_eq!(tree.size(), 5);
    }

    #[test]
    fn test_kleene() {
        let tree = ExpressionNode::from_postfix("a*a.bb.*.").unwrap();
        assert_eq!(tree.to_string(), "((a*.a).(b.b)*)");
    }

    #[test]
    fn test_parentheses_are_skipped() {
        let tree = ExpressionNode::from_postfix("(ab.)").unwrap();
        assert_eq!(tree.to_string(), "(a.b)");
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            ExpressionNode::from_postfix("a+"),
            Err(Error::MissingOperand { operator: '+', position: 1 })
        ));
        assert!(matches!(
            ExpressionNode::from_postfix("*"),
            Err(Error::MissingOperand { operator: '*', position: 0 })
        ));
        assert!(matches!(
            ExpressionNode::from_postfix("ab"),
            Err(Error::DanglingOperands { count: 2 })
        ));
        assert!(matches!(ExpressionNode::from_postfix(""), Err(Error::EmptyPattern)));
    }

    #[test]
    fn test_deep_chain_walks_without_recursion() {
        let depth = 200_000;
        let mut tree = ExpressionNode::Symbol('a');
        for _ in 0..depth {
            tree = ExpressionNode::concat(tree, ExpressionNode::Symbol('b'));
        }
        assert_eq!(tree.size(), 2 * depth + 1);
        assert_eq!(tree.to_string().len(), 4 * depth + 1);
        drop(tree);

        let mut starred = ExpressionNode::Symbol('a');
        for _ in 0..depth {
            starred = ExpressionNode::kleene(starred);
        }
        assert_eq!(starred.size(), depth + 1);
        assert!(starred.to_string().ends_with("a**"));
    }

    #[test]
    fn prop_compiled_regex_has_single_root() {
        fn prop(regex: WellFormed) -> bool {
            let postfix = postfix::compile(&regex.0);
            ExpressionNode::from_postfix(&postfix).is_ok()
        }
        QuickCheck::new()
            .tests(300)
            .quickcheck(prop as fn(WellFormed) -> bool);
    }
}
