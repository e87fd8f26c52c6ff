//! Peer node state and additive-share primitives.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Node identifier.
///
/// Ids are dense and 0-based: a node's id doubles as its index in the
/// owning graph's node array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The id as an array index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// One peer's numeric state.
///
/// Neighbor relations live in the owning [`Graph`](crate::Graph) as
/// index-based adjacency, so a node carries only its id and values.
/// Identity is the id alone: two nodes are equal iff their ids match,
/// regardless of value.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Stable identity; index into the graph's node array.
    pub id: NodeId,
    /// Current state, mutated every iteration.
    pub value: f64,
    /// Snapshot fixed when initial values are assigned; used only to
    /// compute the ground-truth average.
    pub starting_value: f64,
}

impl Node {
    /// Create a node holding 0.0.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            value: 0.0,
            starting_value: 0.0,
        }
    }

    /// Assign the value and fix the starting snapshot in one step.
    pub(crate) fn assign_starting_value(&mut self, value: f64) {
        self.value = value;
        self.starting_value = value;
    }

    /// Generate one random share per neighbor in
    /// `[-random_range, random_range]` and subtract their sum from this
    /// node's value.
    ///
    /// Returns the per-neighbor shares to deliver. Delivering every share
    /// to its addressee restores the global sum exactly.
    pub fn generate_shares(
        &mut self,
        neighbors: &BTreeSet<NodeId>,
        random_range: f64,
        rng: &mut impl Rng,
    ) -> Vec<(NodeId, f64)> {
        let mut shares = Vec::with_capacity(neighbors.len());
        let mut total_sent = 0.0;

        for &neighbor in neighbors {
            let share = rng.gen_range(-random_range..=random_range);
            shares.push((neighbor, share));
            total_sent += share;
        }

        self.value -= total_sent;
        shares
    }

    /// Add the sum of all shares received from neighbors to this node's
    /// value.
    pub fn apply_received_shares(&mut self, received: &[f64]) {
        self.value += received.iter().sum::<f64>();
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node {}: {}", self.id.0, self.value)
    }
}
