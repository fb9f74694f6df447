//! Network validation logic.

use std::collections::{BTreeMap, BTreeSet};

use rf_core::{CouplingKey, NodeId};

use crate::error::{NetworkError, NetworkResult};
use crate::node::{Node, NodeKind};

/// Validate node parameters and uniqueness.
pub(crate) fn validate_nodes(nodes: &[Node]) -> NetworkResult<()> {
    let mut seen = BTreeSet::new();
    for node in nodes {
        if !seen.insert(node.id) {
            return Err(NetworkError::DuplicateNode { node: node.id });
        }
        validate_node(node)?;
    }
    Ok(())
}

pub(crate) fn validate_node(node: &Node) -> NetworkResult<()> {
    if !node.temperature_c.is_finite() {
        return Err(NetworkError::InvalidNode {
            node: node.id,
            what: "temperature must be finite",
        });
    }
    if !node.mass_kg.is_finite() || node.mass_kg < 0.0 {
        return Err(NetworkError::InvalidNode {
            node: node.id,
            what: "mass must be finite and non-negative",
        });
    }
    if !node.specific_heat_j_per_kg_k.is_finite() || node.specific_heat_j_per_kg_k < 0.0 {
        return Err(NetworkError::InvalidNode {
            node: node.id,
            what: "specific heat must be finite and non-negative",
        });
    }
    if node.kind != NodeKind::Lumped && node.mass_kg != 0.0 {
        return Err(NetworkError::InvalidNode {
            node: node.id,
            what: "only lumped nodes carry mass",
        });
    }
    if node.is_integrated() && node.specific_heat_j_per_kg_k == 0.0 {
        return Err(NetworkError::InvalidNode {
            node: node.id,
            what: "a node with mass needs a positive specific heat",
        });
    }
    Ok(())
}

pub(crate) fn validate_conductance(key: CouplingKey, g: f64) -> NetworkResult<f64> {
    if !g.is_finite() || g < 0.0 {
        return Err(NetworkError::InvalidCoupling {
            key,
            what: "conductance must be finite and non-negative",
        });
    }
    Ok(g)
}

/// Validate couplings against the node set and canonicalize their keys.
pub(crate) fn validate_couplings(
    nodes: &BTreeMap<NodeId, Node>,
    couplings: &[(NodeId, NodeId, f64)],
) -> NetworkResult<BTreeMap<CouplingKey, f64>> {
    let mut out = BTreeMap::new();
    for &(a, b, g) in couplings {
        let key = CouplingKey::new(a, b)?;
        for end in [key.low(), key.high()] {
            let node = nodes
                .get(&end)
                .ok_or(NetworkError::UnknownNode { node: end })?;
            if node.kind == NodeKind::Derived {
                return Err(NetworkError::InvalidCoupling {
                    key,
                    what: "derived nodes cannot be coupled",
                });
            }
        }
        let g = validate_conductance(key, g)?;
        if out.insert(key, g).is_some() {
            return Err(NetworkError::DuplicateCoupling { key });
        }
    }
    Ok(out)
}
