use core::fmt;
use core::str::FromStr;

use crate::error::{RfError, RfResult};

/// Identifier of a lumped node in the appliance network.
///
/// The declaration order is the total order used by [`CouplingKey`]:
/// `Ambient < Cabinet1 < Cabinet2 < Food1 < Food2 < Condenser < Evaporator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeId {
    Ambient,
    #[cfg_attr(feature = "serde", serde(rename = "cabinet_1"))]
    Cabinet1,
    #[cfg_attr(feature = "serde", serde(rename = "cabinet_2"))]
    Cabinet2,
    #[cfg_attr(feature = "serde", serde(rename = "food_1"))]
    Food1,
    #[cfg_attr(feature = "serde", serde(rename = "food_2"))]
    Food2,
    /// Condensing-temperature proxy (`ambient + ΔAC`).
    Condenser,
    /// Evaporating-temperature proxy (`cabinet_1 - ΔCE`).
    Evaporator,
}

impl NodeId {
    pub const COUNT: usize = 7;

    pub const ALL: [NodeId; Self::COUNT] = [
        NodeId::Ambient,
        NodeId::Cabinet1,
        NodeId::Cabinet2,
        NodeId::Food1,
        NodeId::Food2,
        NodeId::Condenser,
        NodeId::Evaporator,
    ];

    /// Dense 0-based index, stable across releases.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeId::Ambient => "ambient",
            NodeId::Cabinet1 => "cabinet_1",
            NodeId::Cabinet2 => "cabinet_2",
            NodeId::Food1 => "food_1",
            NodeId::Food2 => "food_2",
            NodeId::Condenser => "condenser",
            NodeId::Evaporator => "evaporator",
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeId {
    type Err = RfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| RfError::UnknownNode {
                name: s.to_string(),
            })
    }
}

/// One of the two independently controlled compartments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Compartment {
    First,
    Second,
}

impl Compartment {
    pub const ALL: [Compartment; 2] = [Compartment::First, Compartment::Second];

    /// Map the 1-based compartment number used on front panels.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Compartment::First),
            2 => Some(Compartment::Second),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Compartment::First => 1,
            Compartment::Second => 2,
        }
    }

    pub fn cabinet(self) -> NodeId {
        match self {
            Compartment::First => NodeId::Cabinet1,
            Compartment::Second => NodeId::Cabinet2,
        }
    }

    pub fn food(self) -> NodeId {
        match self {
            Compartment::First => NodeId::Food1,
            Compartment::Second => NodeId::Food2,
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "compartment {}", self.number())
    }
}

/// Undirected edge key: the two endpoints stored in ascending [`NodeId`] order.
///
/// `CouplingKey::new(a, b) == CouplingKey::new(b, a)` for every pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CouplingKey {
    low: NodeId,
    high: NodeId,
}

impl CouplingKey {
    pub fn new(a: NodeId, b: NodeId) -> RfResult<Self> {
        if a == b {
            return Err(RfError::SelfCoupling { node: a });
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { low, high })
    }

    pub fn low(self) -> NodeId {
        self.low
    }

    pub fn high(self) -> NodeId {
        self.high
    }

    pub fn contains(self, node: NodeId) -> bool {
        self.low == node || self.high == node
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other(self, node: NodeId) -> Option<NodeId> {
        if node == self.low {
            Some(self.high)
        } else if node == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for CouplingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<->{}", self.low, self.high)
    }
}
