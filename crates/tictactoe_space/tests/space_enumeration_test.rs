//! Tests for state-space and action-space enumeration.

use std::collections::{BTreeSet, HashSet};
use tictactoe_space::{Board, Explorer, Mark, SpaceSummary, StateSpace, rules};

const STATES: usize = 5478;
const TERMINAL: usize = 958;
const ACTIONS: usize = 16167;

fn x_first() -> StateSpace {
    StateSpace::explore(&Board::new(true)).expect("enumeration succeeds")
}

#[test]
fn test_state_space_size_x_first() {
    let space = x_first();
    assert_eq!(space.len(), STATES);
    assert_eq!(space.terminal_count(), TERMINAL);
    assert_eq!(space.action_count(), ACTIONS);
}

#[test]
fn test_state_space_size_o_first() {
    let space = StateSpace::explore(&Board::new(false)).unwrap();
    assert_eq!(space.len(), STATES);
    assert_eq!(space.terminal_count(), TERMINAL);
    assert_eq!(space.action_count(), ACTIONS);
}

#[test]
fn test_summary_outcome_split() {
    assert_eq!(
        x_first().summary(),
        SpaceSummary::new(STATES, TERMINAL, 626, 316, 16, ACTIONS)
    );

    let o_first = StateSpace::explore(&Board::new(false)).unwrap().summary();
    assert_eq!(o_first.o_wins, 626);
    assert_eq!(o_first.x_wins, 316);
}

#[test]
fn test_no_duplicate_states_or_actions() {
    let space = x_first();
    assert_eq!(space.state_keys().len(), space.len());
    assert_eq!(space.action_pairs().len(), space.action_count());

    let unique: HashSet<_> = space.states().map(|n| *n.key()).collect();
    assert_eq!(unique.len(), STATES);
}

#[test]
fn test_root_is_empty_board() {
    let space = x_first();
    let root = space.root().expect("root recorded");
    assert_eq!(root, &Board::new(true).canonical_key());
    assert_eq!(root.occupied(), 0);
}

#[test]
fn test_action_completeness() {
    let space = x_first();
    for node in space.states() {
        if node.terminal() {
            assert!(node.outgoing().is_empty(), "terminal {} has actions", node.key());
        } else {
            assert!(!node.outgoing().is_empty(), "{} has no actions", node.key());
        }
    }

    let keys = space.state_keys();
    for (from, to) in space.action_pairs() {
        assert!(keys.contains(&from));
        assert!(keys.contains(&to));
        assert_eq!(from.changed_cells(&to).len(), 1);
    }
}

#[test]
fn test_outgoing_matches_legal_moves() {
    let space = x_first();
    for node in space.states().filter(|n| !n.terminal()) {
        let board = Board::from_key(node.key(), true).unwrap();
        assert_eq!(node.outgoing().len(), board.legal_moves().len());
    }
}

#[test]
fn test_terminal_correctness() {
    let space = x_first();
    for node in space.states() {
        let squares = node.key().squares();
        let x = rules::has_line(squares, Mark::X);
        let o = rules::has_line(squares, Mark::O);
        assert!(!(x && o), "both players win in {}", node.key());

        let board = Board::from_key(node.key(), true).unwrap();
        assert_eq!(board.terminal(), node.terminal());
        assert_eq!(board.victory(Mark::X), x);
        assert_eq!(board.victory(Mark::O), o);
        if node.terminal() && !x && !o {
            assert!(board.is_full(), "terminal {} has no line and is not full", node.key());
        }
    }
}

#[test]
fn test_turn_is_last_mover_on_wins() {
    let space = x_first();
    for node in space.states().filter(|n| n.terminal()) {
        let key = node.key();
        if let Some(winner) = [Mark::X, Mark::O]
            .into_iter()
            .find(|m| rules::has_line(key.squares(), *m))
        {
            assert_eq!(key.turn(), winner);
        }
    }
}

#[test]
fn test_enumeration_is_deterministic() {
    let a = x_first();
    let b = x_first();
    let a_keys: Vec<_> = a.states().map(|n| *n.key()).collect();
    let b_keys: Vec<_> = b.states().map(|n| *n.key()).collect();
    assert_eq!(a_keys, b_keys);
}

#[test]
fn test_merge_is_order_independent() {
    let x = x_first();
    let o = StateSpace::explore(&Board::new(false)).unwrap();

    let mut xo = x.clone();
    xo.merge(&o);
    let mut ox = o.clone();
    ox.merge(&x);

    assert_eq!(xo.state_keys(), ox.state_keys());
    assert_eq!(xo.action_pairs(), ox.action_pairs());
    // The two roots never share a key: turn and mark counts always disagree.
    assert_eq!(xo.len(), 2 * STATES);
    assert_eq!(xo.action_count(), 2 * ACTIONS);
}

#[test]
fn test_merge_of_subtrees_equals_full_enumeration() {
    let root = Board::new(true);
    let full = x_first();

    let mut merged = StateSpace::default();
    for cell in root.legal_moves().into_iter().rev() {
        let mut child = root.clone();
        child.place(cell).unwrap();
        merged.merge(&StateSpace::explore(&child).unwrap());
    }

    let mut keys = merged.state_keys();
    keys.insert(root.canonical_key());
    assert_eq!(keys, full.state_keys());

    let below_root: BTreeSet<_> = full
        .action_pairs()
        .into_iter()
        .filter(|(from, _)| *from != root.canonical_key())
        .collect();
    assert_eq!(merged.action_pairs(), below_root);
}

#[test]
fn test_explorer_matches_direct_enumeration() {
    let explorer = Explorer::new(Board::new(true));
    let cached = explorer.space().unwrap();
    assert_eq!(cached.state_keys(), x_first().state_keys());
    assert!(std::ptr::eq(cached, explorer.space().unwrap()));
}

#[test]
fn test_summary_serializes() {
    let json = serde_json::to_value(x_first().summary()).unwrap();
    assert_eq!(json["states"], 5478);
    assert_eq!(json["actions"], 16167);
}
