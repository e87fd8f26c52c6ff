//! Core types for masked average consensus.
//!
//! A [`Graph`] owns a dense array of [`Node`]s plus an index-based
//! adjacency structure built from a [`Topology`]. After construction the
//! neighbor relation never changes; only node values do. That makes a
//! plain [`Clone`] sufficient to isolate one simulation run from the base
//! graph shared by many runs.

mod error;
mod graph;
mod node;
mod topology;

pub use error::GraphError;
pub use graph::Graph;
pub use node::{Node, NodeId};
pub use topology::{ParseTopologyError, Topology};
