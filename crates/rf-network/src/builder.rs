//! Incremental network builder.

use std::collections::BTreeMap;

use rf_core::NodeId;

use crate::error::NetworkResult;
use crate::network::ThermalNetwork;
use crate::node::{Node, NodeKind};
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Use `add_node` and `couple` to describe the network, then call `build()`
/// to validate and freeze the topology into a [`ThermalNetwork`]. Node
/// temperatures, masses and conductances stay mutable afterwards; the set of
/// nodes and couplings does not.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    couplings: Vec<(NodeId, NodeId, f64)>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node.
    pub fn add_node(
        &mut self,
        id: NodeId,
        kind: NodeKind,
        mass_kg: f64,
        specific_heat_j_per_kg_k: f64,
        temperature_c: f64,
    ) -> &mut Self {
        self.nodes.push(Node {
            id,
            kind,
            mass_kg,
            specific_heat_j_per_kg_k,
            temperature_c,
        });
        self
    }

    /// Declare an undirected coupling with an initial conductance in W/K.
    pub fn couple(&mut self, a: NodeId, b: NodeId, conductance_w_per_k: f64) -> &mut Self {
        self.couplings.push((a, b, conductance_w_per_k));
        self
    }

    /// Build and validate the network.
    pub fn build(self) -> NetworkResult<ThermalNetwork> {
        validate::validate_nodes(&self.nodes)?;

        let nodes: BTreeMap<NodeId, Node> = self.nodes.into_iter().map(|n| (n.id, n)).collect();
        let couplings = validate::validate_couplings(&nodes, &self.couplings)?;

        Ok(ThermalNetwork::from_parts(nodes, couplings))
    }
}
