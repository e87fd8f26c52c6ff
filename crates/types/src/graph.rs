//! The peer graph: topology construction, initial values, and the
//! one-time additive-share setup.

use crate::{GraphError, Node, NodeId, Topology};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// A fixed set of peer nodes plus their neighbor relations.
///
/// Nodes are stored densely (index = id). The neighbor relation is
/// symmetric and free of self-loops, and never changes after
/// construction; only node values do.
#[derive(Debug, Clone, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    neighbors: Vec<BTreeSet<NodeId>>,
    topology: Topology,
    true_avg: f64,
}

impl Graph {
    /// Build a graph with the given number of nodes and topology.
    ///
    /// The random source is consumed only by [`Topology::Mesh`]; the
    /// other patterns are deterministic given `num_nodes`. A mesh is
    /// always returned connected, bridging components when the random
    /// draw comes out disconnected.
    pub fn new(
        num_nodes: usize,
        topology: Topology,
        rng: &mut impl Rng,
    ) -> Result<Self, GraphError> {
        if num_nodes == 0 {
            return Err(GraphError::Empty);
        }

        let mut graph = Self {
            nodes: (0..num_nodes as u32).map(|i| Node::new(NodeId(i))).collect(),
            neighbors: vec![BTreeSet::new(); num_nodes],
            topology,
            true_avg: 0.0,
        };
        graph.initialize_connections(rng);
        Ok(graph)
    }

    fn initialize_connections(&mut self, rng: &mut impl Rng) {
        match self.topology {
            Topology::Ring => self.initialize_ring(),
            Topology::Star => self.initialize_star(),
            Topology::Tree => self.initialize_tree(),
            Topology::Mesh => self.initialize_mesh(rng),
            Topology::Full => self.initialize_full(),
        }
    }

    /// Node i connects to node (i + 1) mod N, forming a single cycle.
    fn initialize_ring(&mut self) {
        let n = self.nodes.len();
        for i in 0..n {
            self.connect(NodeId(i as u32), NodeId(((i + 1) % n) as u32));
        }
    }

    /// Node 0 is the center; every other node connects to it.
    fn initialize_star(&mut self) {
        for i in 1..self.nodes.len() {
            self.connect(NodeId(0), NodeId(i as u32));
        }
    }

    /// Heap-indexed complete binary tree: node i's parent is (i - 1) / 2.
    fn initialize_tree(&mut self) {
        for i in 1..self.nodes.len() {
            let parent = (i - 1) / 2;
            self.connect(NodeId(i as u32), NodeId(parent as u32));
        }
    }

    /// Erdős–Rényi draw with p = clamp(1 / ln(N + 2), 0.02, 0.8),
    /// repaired to a single connected component if needed.
    ///
    /// N < 2 yields the edgeless graph, which is trivially connected.
    fn initialize_mesh(&mut self, rng: &mut impl Rng) {
        let n = self.nodes.len();
        if n < 2 {
            return;
        }

        let p = (1.0 / ((n as f64) + 2.0).ln()).clamp(0.02, 0.8);
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen_bool(p) {
                    self.connect(NodeId(i as u32), NodeId(j as u32));
                }
            }
        }

        if self.is_connected() {
            return;
        }

        // Bridge adjacent components (in discovery order) with one random
        // cross edge per pair rather than redrawing the whole graph.
        let components = self.connected_components();
        debug!(
            components = components.len(),
            "mesh draw disconnected, bridging"
        );
        for pair in components.windows(2) {
            let a = pair[0][rng.gen_range(0..pair[0].len())];
            let b = pair[1][rng.gen_range(0..pair[1].len())];
            self.connect(a, b);
        }
    }

    /// Every distinct pair connects.
    fn initialize_full(&mut self) {
        let n = self.nodes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                self.connect(NodeId(i as u32), NodeId(j as u32));
            }
        }
    }

    /// Add a symmetric edge. Self-loops are ignored.
    fn connect(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        self.neighbors[a.index()].insert(b);
        self.neighbors[b.index()].insert(a);
    }

    /// Whether every node is reachable from node 0 (breadth-first).
    pub fn is_connected(&self) -> bool {
        let mut reached = vec![false; self.nodes.len()];
        let mut queue = std::collections::VecDeque::from([NodeId(0)]);
        reached[0] = true;
        let mut count = 1;

        while let Some(current) = queue.pop_front() {
            for &neighbor in &self.neighbors[current.index()] {
                if !reached[neighbor.index()] {
                    reached[neighbor.index()] = true;
                    count += 1;
                    queue.push_back(neighbor);
                }
            }
        }

        count == self.nodes.len()
    }

    /// Connected components in discovery order (breadth-first from
    /// ascending unvisited ids).
    fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let mut visited = vec![false; self.nodes.len()];
        let mut components = Vec::new();

        for start in 0..self.nodes.len() {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            let mut component = vec![NodeId(start as u32)];
            let mut queue = std::collections::VecDeque::from([NodeId(start as u32)]);

            while let Some(current) = queue.pop_front() {
                for &neighbor in &self.neighbors[current.index()] {
                    if !visited[neighbor.index()] {
                        visited[neighbor.index()] = true;
                        component.push(neighbor);
                        queue.push_back(neighbor);
                    }
                }
            }
            components.push(component);
        }

        components
    }

    /// Assign each node a value drawn uniformly from
    /// `[range_start, range_end]`, fixing the starting snapshots and the
    /// ground-truth average in the same step.
    pub fn set_initial_values(
        &mut self,
        range_start: f64,
        range_end: f64,
        rng: &mut impl Rng,
    ) -> Result<(), GraphError> {
        if !(range_start.is_finite() && range_end.is_finite()) || range_start > range_end {
            return Err(GraphError::InvalidValueRange {
                start: range_start,
                end: range_end,
            });
        }

        for node in &mut self.nodes {
            node.assign_starting_value(rng.gen_range(range_start..=range_end));
        }
        self.true_avg = self.avg();
        Ok(())
    }

    /// Assign explicit starting values, one per node in id order.
    ///
    /// Used by experiments with known inputs; fixes starting snapshots
    /// and the ground-truth average exactly like
    /// [`set_initial_values`](Self::set_initial_values).
    pub fn set_starting_values(&mut self, values: &[f64]) -> Result<(), GraphError> {
        if values.len() != self.nodes.len() {
            return Err(GraphError::ValueCountMismatch {
                expected: self.nodes.len(),
                got: values.len(),
            });
        }

        for (node, &value) in self.nodes.iter_mut().zip(values) {
            node.assign_starting_value(value);
        }
        self.true_avg = self.avg();
        Ok(())
    }

    /// One-time additive secret sharing.
    ///
    /// Phase one: every node generates one share per neighbor in
    /// `[-random_range, random_range]` and subtracts the sum of its
    /// outgoing shares from its own value. Phase two: every node adds the
    /// sum of the shares addressed to it. Each share leaves exactly one
    /// sender and reaches exactly one receiver, so the global sum — and
    /// with it the true average — is preserved up to rounding.
    pub fn apply_shares(
        &mut self,
        random_range: f64,
        rng: &mut impl Rng,
    ) -> Result<(), GraphError> {
        if !random_range.is_finite() || random_range < 0.0 {
            return Err(GraphError::InvalidShareRange(random_range));
        }

        let mut inbox: Vec<Vec<f64>> = vec![Vec::new(); self.nodes.len()];

        for i in 0..self.nodes.len() {
            let shares = self.nodes[i].generate_shares(&self.neighbors[i], random_range, rng);
            for (to, share) in shares {
                inbox[to.index()].push(share);
            }
        }

        for (node, received) in self.nodes.iter_mut().zip(&inbox) {
            node.apply_received_shares(received);
        }
        Ok(())
    }

    /// Largest absolute deviation of any node's value from the
    /// ground-truth average.
    pub fn max_error(&self) -> f64 {
        self.nodes
            .iter()
            .map(|node| (node.value - self.true_avg).abs())
            .fold(0.0, f64::max)
    }

    /// Current arithmetic mean of node values.
    pub fn avg(&self) -> f64 {
        self.nodes.iter().map(|node| node.value).sum::<f64>() / self.nodes.len() as f64
    }

    /// The ground-truth average, fixed when initial values are assigned.
    pub fn true_avg(&self) -> f64 {
        self.true_avg
    }

    /// All nodes, in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// All node ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Neighbor set of a node.
    pub fn neighbors(&self, id: NodeId) -> &BTreeSet<NodeId> {
        &self.neighbors[id.index()]
    }

    /// Number of neighbors of a node.
    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors[id.index()].len()
    }

    /// Largest neighbor-set size in the graph.
    pub fn max_degree(&self) -> usize {
        self.neighbors.iter().map(BTreeSet::len).max().unwrap_or(0)
    }

    /// A node's current value.
    pub fn value(&self, id: NodeId) -> f64 {
        self.nodes[id.index()].value
    }

    /// Overwrite a node's current value.
    pub fn set_value(&mut self, id: NodeId, value: f64) {
        self.nodes[id.index()].value = value;
    }

    /// Snapshot of every node's value, indexed by id.
    pub fn values(&self) -> Vec<f64> {
        self.nodes.iter().map(|node| node.value).collect()
    }

    /// The topology tag this graph was built with.
    pub fn topology(&self) -> Topology {
        self.topology
    }
}
