//! rf-network: lumped thermal network for appliance simulation.
//!
//! Provides:
//! - Node and coupling data (masses, specific heats, conductances)
//! - Incremental network builder with validation
//! - Heat transfer rates and the explicit forward-Euler energy balance
//!
//! # Example
//!
//! ```
//! use rf_core::NodeId;
//! use rf_network::{HeatInputs, NetworkBuilder, NodeKind};
//!
//! let mut builder = NetworkBuilder::new();
//! builder.add_node(NodeId::Ambient, NodeKind::Boundary, 0.0, 0.0, 25.0);
//! builder.add_node(NodeId::Cabinet1, NodeKind::Lumped, 10.0, 1000.0, 5.0);
//! builder.couple(NodeId::Ambient, NodeId::Cabinet1, 0.5);
//! let mut network = builder.build().unwrap();
//!
//! network.advance(60.0, &HeatInputs::new()).unwrap();
//! assert!(network.temperature(NodeId::Cabinet1).unwrap() > 5.0);
//! ```

pub mod builder;
pub mod error;
pub mod network;
pub mod node;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use error::{NetworkError, NetworkResult};
pub use network::{HeatInputs, ThermalNetwork};
pub use node::{Node, NodeKind};
