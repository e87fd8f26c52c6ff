//! Neighbor-connection patterns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed neighbor-connection pattern imposed on a node set.
///
/// All patterns except [`Mesh`](Topology::Mesh) are deterministic given
/// the node count and connected by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Topology {
    /// Single cycle: node i connects to node (i + 1) mod N.
    Ring,
    /// Node 0 connects to every other node; no other edges.
    Star,
    /// Complete binary tree via heap indexing: node i's parent is
    /// (i - 1) / 2.
    Tree,
    /// Erdős–Rényi random graph, repaired to a single connected
    /// component when the draw comes out disconnected.
    Mesh,
    /// Complete graph.
    Full,
}

impl Topology {
    /// Every topology, in sweep order.
    pub const ALL: [Topology; 5] = [
        Topology::Ring,
        Topology::Star,
        Topology::Tree,
        Topology::Mesh,
        Topology::Full,
    ];

    /// Canonical uppercase tag, as used in logs and run reports.
    pub fn name(self) -> &'static str {
        match self {
            Topology::Ring => "RING",
            Topology::Star => "STAR",
            Topology::Tree => "TREE",
            Topology::Mesh => "MESH",
            Topology::Full => "FULL",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognized topology tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown topology `{0}`, expected one of RING, STAR, TREE, MESH, FULL")]
pub struct ParseTopologyError(String);

impl FromStr for Topology {
    type Err = ParseTopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RING" => Ok(Topology::Ring),
            "STAR" => Ok(Topology::Star),
            "TREE" => Ok(Topology::Tree),
            "MESH" => Ok(Topology::Mesh),
            "FULL" => Ok(Topology::Full),
            _ => Err(ParseTopologyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for topology in Topology::ALL {
            let parsed: Topology = topology.name().parse().expect("canonical tag parses");
            assert_eq!(parsed, topology);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ring".parse::<Topology>(), Ok(Topology::Ring));
        assert_eq!("Mesh".parse::<Topology>(), Ok(Topology::Mesh));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("TORUS".parse::<Topology>().is_err());
    }
}
