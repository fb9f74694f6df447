//! Node data.

use rf_core::NodeId;

/// How a node takes part in the energy balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Imposed temperature (ambient). Participates in couplings, never integrated.
    Boundary,
    /// Lumped thermal mass. Integrated while `mass_kg > 0`, absent otherwise.
    Lumped,
    /// Quantity recomputed from other temperatures (compressor proxies).
    /// Never integrated and never coupled.
    Derived,
}

/// A lumped thermal mass with a single temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub mass_kg: f64,
    pub specific_heat_j_per_kg_k: f64,
    pub temperature_c: f64,
}

impl Node {
    /// True when the integrator writes this node.
    pub fn is_integrated(&self) -> bool {
        self.kind == NodeKind::Lumped && self.mass_kg > 0.0
    }

    /// A lumped node with zero mass: modeled as not existing.
    pub fn is_absent(&self) -> bool {
        self.kind == NodeKind::Lumped && self.mass_kg == 0.0
    }

    /// Heat capacity `m * cp` in J/K (zero for non-integrated nodes).
    pub fn heat_capacity_j_per_k(&self) -> f64 {
        if self.is_integrated() {
            self.mass_kg * self.specific_heat_j_per_kg_k
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: NodeKind, mass_kg: f64) -> Node {
        Node {
            id: NodeId::Food1,
            kind,
            mass_kg,
            specific_heat_j_per_kg_k: 3500.0,
            temperature_c: 4.0,
        }
    }

    #[test]
    fn zero_mass_lumped_node_is_absent() {
        let n = node(NodeKind::Lumped, 0.0);
        assert!(n.is_absent());
        assert!(!n.is_integrated());
        assert_eq!(n.heat_capacity_j_per_k(), 0.0);
    }

    #[test]
    fn boundary_is_never_absent_or_integrated() {
        let n = node(NodeKind::Boundary, 0.0);
        assert!(!n.is_absent());
        assert!(!n.is_integrated());
    }

    #[test]
    fn heat_capacity() {
        let n = node(NodeKind::Lumped, 2.0);
        assert_eq!(n.heat_capacity_j_per_k(), 7000.0);
    }
}
