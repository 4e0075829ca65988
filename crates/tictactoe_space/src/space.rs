//! Reachable state space and action space.
//!
//! A single depth-first traversal with a visited index keyed by
//! [`StateKey`] produces both sets. Each state is expanded once, however
//! many move orders reach it. States and actions live in flat arenas and
//! refer to each other by dense ids assigned in discovery order.

use crate::board::Board;
use crate::error::Result;
use crate::key::StateKey;
use crate::rules;
use crate::types::{Cell, Mark};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info, instrument};

/// Dense index of a state in a [`StateSpace`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct StateId(usize);

impl StateId {
    /// Arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Dense index of an action in a [`StateSpace`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct ActionId(usize);

impl ActionId {
    /// Arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A transition produced by one legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct Action {
    source: StateId,
    target: StateId,
    cell: Cell,
}

impl Action {
    /// Source state.
    pub fn source(&self) -> StateId {
        self.source
    }

    /// Destination state.
    pub fn target(&self) -> StateId {
        self.target
    }

    /// Cell played.
    pub fn cell(&self) -> Cell {
        self.cell
    }
}

/// A state and its outgoing actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateNode {
    key: StateKey,
    terminal: bool,
    outgoing: Vec<ActionId>,
}

impl StateNode {
    /// Canonical key.
    pub fn key(&self) -> &StateKey {
        &self.key
    }

    /// True for wins and full boards.
    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// Outgoing actions in discovery order. Empty for terminal states.
    pub fn outgoing(&self) -> &[ActionId] {
        &self.outgoing
    }
}

/// Counts reported for an enumerated space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct SpaceSummary {
    /// Distinct reachable states.
    pub states: usize,
    /// Terminal states.
    pub terminal: usize,
    /// Terminal states won by X.
    pub x_wins: usize,
    /// Terminal states won by O.
    pub o_wins: usize,
    /// Terminal states with a full board and no line.
    pub draws: usize,
    /// Distinct transitions.
    pub actions: usize,
}

/// Deduplicated reachable states and transitions from a root board.
#[derive(Debug, Clone, Default)]
pub struct StateSpace {
    nodes: Vec<StateNode>,
    index: HashMap<StateKey, StateId>,
    actions: Vec<Action>,
    pairs: HashSet<(StateId, StateId)>,
}

impl StateSpace {
    /// Enumerates every state and transition reachable from `root`.
    ///
    /// Each branch works on its own copy of the board. A state is pushed for
    /// expansion only when first discovered.
    ///
    /// # Errors
    ///
    /// Propagates any move failure; these indicate a rules defect.
    #[instrument(skip(root), fields(root = %root.canonical_key()))]
    pub fn explore(root: &Board) -> Result<Self> {
        let mut space = Self::default();
        let (root_id, _) = space.intern(root.canonical_key(), root.terminal());
        let mut stack = vec![(root_id, root.clone())];

        while let Some((id, board)) = stack.pop() {
            if board.terminal() {
                continue;
            }
            for cell in board.legal_moves() {
                let mut next = board.clone();
                next.place(cell)?;
                let (to, fresh) = space.intern(next.canonical_key(), next.terminal());
                space.link(id, to, cell);
                if fresh {
                    stack.push((to, next));
                }
            }
        }

        info!(
            states = space.len(),
            terminal = space.terminal_count(),
            actions = space.action_count(),
            "State space enumerated"
        );
        Ok(space)
    }

    /// Deduplicating union of `other` into `self`.
    ///
    /// The resulting key and pair sets do not depend on merge order. Ids of
    /// states already in `self` are kept.
    #[instrument(skip_all, fields(left = self.len(), right = other.len()))]
    pub fn merge(&mut self, other: &StateSpace) {
        let mapped: Vec<StateId> = other
            .nodes
            .iter()
            .map(|node| self.intern(node.key, node.terminal).0)
            .collect();
        for action in &other.actions {
            self.link(
                mapped[action.source.index()],
                mapped[action.target.index()],
                action.cell,
            );
        }
        debug!(states = self.len(), actions = self.action_count(), "Spaces merged");
    }

    fn intern(&mut self, key: StateKey, terminal: bool) -> (StateId, bool) {
        if let Some(&id) = self.index.get(&key) {
            return (id, false);
        }
        let id = StateId(self.nodes.len());
        self.nodes.push(StateNode {
            key,
            terminal,
            outgoing: Vec::new(),
        });
        self.index.insert(key, id);
        (id, true)
    }

    fn link(&mut self, from: StateId, to: StateId, cell: Cell) -> bool {
        if !self.pairs.insert((from, to)) {
            return false;
        }
        let id = ActionId(self.actions.len());
        self.actions.push(Action::new(from, to, cell));
        self.nodes[from.index()].outgoing.push(id);
        true
    }

    /// Number of distinct states.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no state was recorded.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct transitions.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Number of terminal states.
    pub fn terminal_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.terminal).count()
    }

    /// Root state (first discovered), if any.
    pub fn root(&self) -> Option<&StateKey> {
        self.nodes.first().map(|n| &n.key)
    }

    /// True if `key` was reached.
    pub fn contains(&self, key: &StateKey) -> bool {
        self.index.contains_key(key)
    }

    /// Id of a reached state.
    pub fn id_of(&self, key: &StateKey) -> Option<StateId> {
        self.index.get(key).copied()
    }

    /// State by id.
    pub fn node(&self, id: StateId) -> Option<&StateNode> {
        self.nodes.get(id.index())
    }

    /// Key of a state by id.
    pub fn key(&self, id: StateId) -> Option<&StateKey> {
        self.node(id).map(|n| &n.key)
    }

    /// Action by id.
    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(id.index())
    }

    /// States in id order.
    pub fn states(&self) -> impl Iterator<Item = &StateNode> {
        self.nodes.iter()
    }

    /// Actions in id order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Outgoing actions of a state.
    pub fn actions_from(&self, id: StateId) -> impl Iterator<Item = &Action> {
        self.node(id)
            .map(|n| n.outgoing.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|a| self.action(*a))
    }

    /// All keys as an ordered set.
    pub fn state_keys(&self) -> BTreeSet<StateKey> {
        self.nodes.iter().map(|n| n.key).collect()
    }

    /// All transitions as ordered `(source, destination)` key pairs.
    pub fn action_pairs(&self) -> BTreeSet<(StateKey, StateKey)> {
        self.actions
            .iter()
            .map(|a| (self.nodes[a.source.index()].key, self.nodes[a.target.index()].key))
            .collect()
    }

    /// Outcome counts for reporting.
    pub fn summary(&self) -> SpaceSummary {
        let mut x_wins = 0;
        let mut o_wins = 0;
        let mut draws = 0;
        for node in self.nodes.iter().filter(|n| n.terminal) {
            let squares = node.key.squares();
            if rules::has_line(squares, Mark::X) {
                x_wins += 1;
            } else if rules::has_line(squares, Mark::O) {
                o_wins += 1;
            } else {
                draws += 1;
            }
        }
        SpaceSummary::new(
            self.len(),
            self.terminal_count(),
            x_wins,
            o_wins,
            draws,
            self.action_count(),
        )
    }
}

/// Root board with a lazily enumerated, cached state space.
#[derive(Debug, Clone)]
pub struct Explorer {
    root: Board,
    space: OnceCell<StateSpace>,
}

impl Explorer {
    /// Creates an explorer for a root board. Nothing is enumerated yet.
    pub fn new(root: Board) -> Self {
        Self {
            root,
            space: OnceCell::new(),
        }
    }

    /// Root board.
    pub fn root(&self) -> &Board {
        &self.root
    }

    /// State space, enumerated on first request.
    ///
    /// # Errors
    ///
    /// Propagates enumeration failures; nothing is cached on error.
    pub fn space(&self) -> Result<&StateSpace> {
        if let Some(space) = self.space.get() {
            return Ok(space);
        }
        let space = StateSpace::explore(&self.root)?;
        Ok(self.space.get_or_init(|| space))
    }
}
