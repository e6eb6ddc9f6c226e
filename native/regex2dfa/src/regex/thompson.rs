//! Thompson's construction over expression trees.
//!
//! States live in an arena owned by [`ThompsonBuilder`] and are addressed by
//! index, so two states are the same state only if their ids match. Every
//! recursive case adds at most two states and wires fragment boundaries with
//! epsilon arcs.

use crate::automaton::{EPSILON, StateId, Symbol};
use crate::regex::tree::ExpressionNode;
use indexmap::IndexMap;

/// Outgoing arcs of one construction state, keyed by symbol (epsilon included).
#[derive(Debug, Clone, Default)]
pub struct ThompsonState {
    arcs: IndexMap<Symbol, Vec<StateId>>,
}

impl ThompsonState {
    /// Arcs in insertion order.
    pub fn arcs(&self) -> impl Iterator<Item = (Symbol, &[StateId])> + '_ {
        self.arcs
            .iter()
            .map(|(&symbol, targets)| (symbol, targets.as_slice()))
    }

    pub fn is_terminal(&self) -> bool {
        self.arcs.is_empty()
    }
}

/// The sub-automaton of one subtree: a single entry and a single exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub entry: StateId,
    pub exit: StateId,
}

/// Arena of construction states for a single conversion.
#[derive(Debug, Clone, Default)]
pub struct ThompsonBuilder {
    states: Vec<ThompsonState>,
}

impl ThompsonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, id: StateId) -> Option<&ThompsonState> {
        self.states.get(id as usize)
    }

    fn add_state(&mut self) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(ThompsonState::default());
        id
    }

    fn add_arc(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        self.states[from as usize]
            .arcs
            .entry(symbol)
            .or_default()
            .push(to);
    }

    /// Build the fragment for `node`, adding its states to the arena.
    ///
    /// Union and Kleene nodes take their own entry and exit before any state
    /// of their operands; a Concat node adds no state of its own.
    pub fn construct(&mut self, node: &ExpressionNode) -> Fragment {
        let mut tasks = vec![Task::Enter(node)];
        let mut built: Vec<Fragment> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Enter(ExpressionNode::Symbol(c)) => {
                    let entry = self.add_state();
                    let exit = self.add_state();
                    self.add_arc(entry, *c, exit);
                    built.push(Fragment { entry, exit });
                }
                Task::Enter(ExpressionNode::Concat(left, right)) => {
                    tasks.extend([Task::Concat, Task::Enter(right), Task::Enter(left)]);
                }
                Task::Enter(ExpressionNode::Union(left, right)) => {
                    let outer = self.add_fragment();
                    tasks.extend([Task::Union(outer), Task::Enter(right), Task::Enter(left)]);
                }
                Task::Enter(ExpressionNode::Kleene(operand)) => {
                    let outer = self.add_fragment();
                    tasks.extend([Task::Kleene(outer), Task::Enter(operand)]);
                }
                Task::Concat => {
                    let (left, right) = pop_pair(&mut built);
                    self.add_arc(left.exit, EPSILON, right.entry);
                    built.push(Fragment {
                        entry: left.entry,
                        exit: right.exit,
                    });
                }
                Task::Union(outer) => {
                    let (left, right) = pop_pair(&mut built);
                    self.add_arc(outer.entry, EPSILON, left.entry);
                    self.add_arc(outer.entry, EPSILON, right.entry);
                    self.add_arc(left.exit, EPSILON, outer.exit);
                    self.add_arc(right.exit, EPSILON, outer.exit);
                    built.push(outer);
                }
                Task::Kleene(outer) => {
                    let inner = pop_one(&mut built);
                    self.add_arc(outer.entry, EPSILON, inner.entry);
                    self.add_arc(outer.entry, EPSILON, outer.exit);
                    self.add_arc(inner.exit, EPSILON, inner.entry);
                    self.add_arc(inner.exit, EPSILON, outer.exit);
                    built.push(outer);
                }
            }
        }

        pop_one(&mut built)
    }

    /// A fresh entry and exit pair with no arcs yet.
    fn add_fragment(&mut self) -> Fragment {
        let entry = self.add_state();
        let exit = self.add_state();
        Fragment { entry, exit }
    }
}

/// Pending work of [`ThompsonBuilder::construct`].
enum Task<'a> {
    /// Visit a subtree and push its fragment once built.
    Enter(&'a ExpressionNode),
    /// Join the two most recent fragments.
    Concat,
    /// Wrap the two most recent fragments between `outer`'s entry and exit.
    Union(Fragment),
    /// Wrap the most recent fragment in a loop between `outer`'s entry and exit.
    Kleene(Fragment),
}

// Every Enter task pushes exactly one fragment before the task that consumes
// it runs, so these pops never come up short.
fn pop_one(built: &mut Vec<Fragment>) -> Fragment {
    built
        .pop()
        .unwrap_or_else(|| unreachable!("operand fragment missing"))
}

fn pop_pair(built: &mut Vec<Fragment>) -> (Fragment, Fragment) {
    let right = pop_one(built);
    let left = pop_one(built);
    (left, right)
}
