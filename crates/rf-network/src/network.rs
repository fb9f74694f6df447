//! The thermal network and its forward-Euler energy balance.

use std::collections::BTreeMap;

use rf_core::{CouplingKey, NodeId};

use crate::error::{NetworkError, NetworkResult};
use crate::node::{Node, NodeKind};
use crate::validate;

/// Externally supplied heat flow per node for one step, in W.
///
/// Positive values add heat to the node (compressor capacity extracted from a
/// cabinet is negative).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeatInputs {
    watts: [f64; NodeId::COUNT],
}

impl HeatInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `watts` to the node's input (accumulates).
    pub fn add(&mut self, node: NodeId, watts: f64) -> &mut Self {
        self.watts[node.index()] += watts;
        self
    }

    pub fn get(&self, node: NodeId) -> f64 {
        self.watts[node.index()]
    }
}

/// Lumped-capacitance network of nodes joined by conductances.
///
/// Topology is fixed at build time; temperatures, masses and conductances can
/// be changed between steps.
#[derive(Debug, Clone)]
pub struct ThermalNetwork {
    nodes: BTreeMap<NodeId, Node>,
    couplings: BTreeMap<CouplingKey, f64>,
}

impl ThermalNetwork {
    pub(crate) fn from_parts(
        nodes: BTreeMap<NodeId, Node>,
        couplings: BTreeMap<CouplingKey, f64>,
    ) -> Self {
        Self { nodes, couplings }
    }

    /// Iterate over nodes in [`NodeId`] order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate over couplings and their current conductance (W/K).
    pub fn couplings(&self) -> impl Iterator<Item = (CouplingKey, f64)> + '_ {
        self.couplings.iter().map(|(k, g)| (*k, *g))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> NetworkResult<&Node> {
        self.nodes
            .get(&id)
            .ok_or(NetworkError::UnknownNode { node: id })
    }

    fn node_mut(&mut self, id: NodeId) -> NetworkResult<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or(NetworkError::UnknownNode { node: id })
    }

    pub fn temperature(&self, id: NodeId) -> NetworkResult<f64> {
        Ok(self.node(id)?.temperature_c)
    }

    /// Overwrite a node temperature (boundary update, derived recompute, food loading).
    pub fn set_temperature(&mut self, id: NodeId, temperature_c: f64) -> NetworkResult<()> {
        if !temperature_c.is_finite() {
            return Err(NetworkError::InvalidNode {
                node: id,
                what: "temperature must be finite",
            });
        }
        self.node_mut(id)?.temperature_c = temperature_c;
        Ok(())
    }

    /// Change the mass of a lumped node. Zero removes it from the balance.
    pub fn set_mass(&mut self, id: NodeId, mass_kg: f64) -> NetworkResult<()> {
        let node = self.node_mut(id)?;
        if node.kind != NodeKind::Lumped {
            return Err(NetworkError::InvalidNode {
                node: id,
                what: "only lumped nodes carry mass",
            });
        }
        let mut candidate = node.clone();
        candidate.mass_kg = mass_kg;
        validate::validate_node(&candidate)?;
        node.mass_kg = mass_kg;
        Ok(())
    }

    pub fn conductance(&self, a: NodeId, b: NodeId) -> NetworkResult<f64> {
        let key = CouplingKey::new(a, b)?;
        self.couplings
            .get(&key)
            .copied()
            .ok_or(NetworkError::UnknownCoupling { a, b })
    }

    /// Update the conductance of an existing coupling.
    pub fn set_conductance(&mut self, a: NodeId, b: NodeId, g_w_per_k: f64) -> NetworkResult<()> {
        let key = CouplingKey::new(a, b)?;
        let g = validate::validate_conductance(key, g_w_per_k)?;
        let slot = self
            .couplings
            .get_mut(&key)
            .ok_or(NetworkError::UnknownCoupling { a, b })?;
        *slot = g;
        Ok(())
    }

    /// Heat flow from `a` to `b` in W: `(T[a] - T[b]) * G(a, b)`.
    pub fn heat_transfer_rate(&self, a: NodeId, b: NodeId) -> NetworkResult<f64> {
        let g = self.conductance(a, b)?;
        Ok((self.temperature(a)? - self.temperature(b)?) * g)
    }

    /// Net heat flow into `id` in W: coupling flows plus the external input.
    ///
    /// Couplings to absent nodes carry nothing.
    pub fn net_heat_rate(&self, id: NodeId, inputs: &HeatInputs) -> NetworkResult<f64> {
        let node = self.node(id)?;
        let mut q = inputs.get(id);
        for (key, g) in &self.couplings {
            let Some(other) = key.other(id) else {
                continue;
            };
            let other = self.node(other)?;
            if other.is_absent() {
                continue;
            }
            q += (other.temperature_c - node.temperature_c) * g;
        }
        Ok(q)
    }

    /// Advance every integrated node by one explicit forward-Euler step.
    ///
    /// All rates are evaluated from the start-of-step temperatures before any
    /// node is written. Boundary, derived and absent nodes are left untouched,
    /// and inputs addressed to them are ignored. Stability requires
    /// `dt << m * cp / G` for every coupling; no step control is done here.
    pub fn advance(&mut self, dt_s: f64, inputs: &HeatInputs) -> NetworkResult<()> {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return Err(NetworkError::InvalidArg {
                what: "dt must be positive and finite",
            });
        }

        let mut net_w = [0.0_f64; NodeId::COUNT];
        for (key, g) in &self.couplings {
            let low = self.node(key.low())?;
            let high = self.node(key.high())?;
            if low.is_absent() || high.is_absent() {
                continue;
            }
            let q = (low.temperature_c - high.temperature_c) * g;
            net_w[key.low().index()] -= q;
            net_w[key.high().index()] += q;
        }

        for node in self.nodes.values_mut() {
            if !node.is_integrated() {
                continue;
            }
            let energy_j = (net_w[node.id.index()] + inputs.get(node.id)) * dt_s;
            node.temperature_c += energy_j / (node.mass_kg * node.specific_heat_j_per_kg_k);
        }
        Ok(())
    }

    /// Sum of `m * cp * T` over integrated nodes, in J (relative to 0 °C).
    pub fn stored_energy_j(&self) -> f64 {
        self.nodes
            .values()
            .map(|n| n.heat_capacity_j_per_k() * n.temperature_c)
            .sum()
    }
}
