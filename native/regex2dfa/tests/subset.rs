use quickcheck::{Arbitrary, Gen, QuickCheck};
use regex2dfa::{Dfa, Nfa, StateId, StateSet, SubsetOptions, subset_construction_with};
use std::collections::{HashSet, VecDeque};

const FOUR_STATES: &str = r#"{
    "states": ["0", "1", "2", "3"],
    "alphabet": ["a", "b"],
    "transition_function": [
        ["0", "a", "0"], ["0", "a", "1"], ["0", "b", "0"],
        ["1", "a", "2"], ["1", "b", "2"],
        ["2", "a", "3"], ["2", "b", "3"],
        ["3", "b", "3"]
    ],
    "start_states": ["0"],
    "final_states": ["2", "3"]
}"#;

fn reachable(dfa: &Dfa) -> HashSet<StateId> {
    let mut seen = HashSet::from([dfa.start_state()]);
    let mut queue = VecDeque::from([dfa.start_state()]);
    while let Some(state) = queue.pop_front() {
        for &symbol in dfa.alphabet() {
            if let Some(next) = dfa.transition(state, symbol) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    seen
}

#[test]
fn four_state_nfa_with_loop_on_start() {
    let nfa = Nfa::from_json(FOUR_STATES).unwrap();
    let dfa = subset_construction_with(&nfa, &SubsetOptions::default());

    // {0} {0,1} {0,1,2} {0,1,2,3} {0,2} {0,1,3} {0,3} {0,2,3}
    assert_eq!(dfa.num_states(), 8);
    assert_eq!(reachable(&dfa).len(), dfa.num_states());

    let accepting = StateSet::from_iter([2, 3]);
    for (id, state) in dfa.states().iter().enumerate() {
        let expected = state.representative().intersects(&accepting);
        assert_eq!(state.is_final(), expected, "state {id}");
        assert_eq!(dfa.final_states().contains(id as StateId), expected);
    }

    assert!(dfa.accepts("aa"));
    assert!(dfa.accepts("ab"));
    assert!(dfa.accepts("bbabb"));
    assert!(!dfa.accepts("b"));
    assert!(!dfa.accepts("ba"));
    assert!(!dfa.accepts("abba"));
    assert!(!dfa.is_empty());
}

#[test]
fn four_state_nfa_with_self_loops() {
    let mut nfa = Nfa::new();
    for name in ["0", "1", "2", "3"] {
        nfa.add_state(name);
    }
    nfa.add_transition(0, 'a', 1);
    nfa.add_transition(0, 'b', 0);
    nfa.add_transition(1, 'a', 1);
    nfa.add_transition(1, 'a', 2);
    nfa.add_transition(1, 'b', 2);
    nfa.add_transition(2, 'a', 3);
    nfa.add_transition(3, 'b', 3);
    nfa.add_start_state(0);
    nfa.add_final_state(2);
    nfa.add_final_state(3);

    let dfa = subset_construction_with(&nfa, &SubsetOptions::default());

    let representatives: Vec<Vec<StateId>> = dfa
        .states()
        .iter()
        .map(|state| state.representative().to_vec())
        .collect();
    assert_eq!(
        representatives,
        vec![
            vec![0],
            vec![1],
            vec![1, 2],
            vec![2],
            vec![1, 2, 3],
            vec![3],
            vec![2, 3],
        ]
    );
    assert_eq!(reachable(&dfa).len(), 7);

    let expected: Vec<StateId> = dfa
        .states()
        .iter()
        .enumerate()
        .filter(|(_, state)| {
            let members = state.representative();
            members.contains(2) || members.contains(3)
        })
        .map(|(id, _)| id as StateId)
        .collect();
    assert_eq!(expected, vec![2, 3, 4, 5, 6]);
    assert_eq!(dfa.final_states().to_vec(), expected);

    assert_eq!(dfa.transition(0, 'b'), Some(0));
    assert_eq!(dfa.transition(3, 'b'), None);
    assert!(dfa.accepts("aa"));
    assert!(dfa.accepts("bab"));
    assert!(!dfa.accepts("ba"));
}

#[test]
fn representative_equality_ignores_insertion_order() {
    let forward = StateSet::from_iter([1, 2]);
    let backward = StateSet::from_iter([2, 1]);
    assert_eq!(forward, backward);

    let mut nfa = Nfa::new();
    for name in ["0", "1", "2"] {
        nfa.add_state(name);
    }
    // Both symbols reach {1, 2}, inserted in opposite orders
    nfa.add_transition(0, 'a', 1);
    nfa.add_transition(0, 'a', 2);
    nfa.add_transition(0, 'b', 2);
    nfa.add_transition(0, 'b', 1);
    nfa.add_start_state(0);
    nfa.add_final_state(2);

    let dfa = subset_construction_with(&nfa, &SubsetOptions::default());
    assert_eq!(dfa.num_states(), 2);
    assert_eq!(dfa.transition(0, 'a'), dfa.transition(0, 'b'));
    assert_eq!(dfa.find_state(&backward), Some(1));
}

#[derive(Clone, Debug)]
struct RandomNfa(Nfa);

impl Arbitrary for RandomNfa {
    fn arbitrary(g: &mut Gen) -> Self {
        let states = 1 + usize::arbitrary(g) % 6;
        let mut nfa = Nfa::new();
        for idx in 0..states {
            nfa.add_state(format!("s{idx}"));
        }
        let arcs = usize::arbitrary(g) % 12;
        for _ in 0..arcs {
            let source = (usize::arbitrary(g) % states) as StateId;
            let destination = (usize::arbitrary(g) % states) as StateId;
            let symbol = *g.choose(&['a', 'b', '$']).unwrap_or(&'a');
            nfa.add_transition(source, symbol, destination);
        }
        for id in 0..states as StateId {
            if bool::arbitrary(g) {
                nfa.add_start_state(id);
            }
            if bool::arbitrary(g) {
                nfa.add_final_state(id);
            }
        }
        RandomNfa(nfa)
    }
}

fn invariants_hold(nfa: &Nfa, options: &SubsetOptions) -> bool {
    let dfa = subset_construction_with(nfa, options);
    let finals = nfa.final_states();
    let close = |set: StateSet| {
        if options.epsilon_closure {
            nfa.epsilon_closure(&set)
        } else {
            set
        }
    };

    let distinct: HashSet<Vec<StateId>> = dfa
        .states()
        .iter()
        .map(|state| state.representative().to_vec())
        .collect();
    let start_matches = dfa
        .state(dfa.start_state())
        .is_none_or(|state| state.representative() == &close(nfa.start_states()));

    let complete = dfa.states().iter().enumerate().all(|(id, state)| {
        dfa.alphabet().iter().all(|&symbol| {
            let target = close(nfa.move_on_symbol(state.representative(), symbol));
            match dfa.transition(id as StateId, symbol) {
                Some(next) => dfa.state(next).map(|s| s.representative()) == Some(&target),
                None => target.is_empty(),
            }
        })
    });
    let finality = dfa
        .states()
        .iter()
        .all(|state| state.is_final() == state.representative().intersects(&finals));

    distinct.len() == dfa.num_states()
        && start_matches
        && complete
        && finality
        && reachable(&dfa).len() == dfa.num_states().max(1)
}

#[test]
fn prop_subset_construction_invariants() {
    fn prop(nfa: RandomNfa, closure: bool) -> bool {
        // Empty start sets yield a single empty state with no transitions
        if nfa.0.start_states().is_empty() {
            return true;
        }
        invariants_hold(
            &nfa.0,
            &SubsetOptions {
                epsilon_closure: closure,
            },
        )
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(RandomNfa, bool) -> bool);
}
