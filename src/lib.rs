//! # qualreas
//!
//! A qualitative constraint reasoner for binary relation algebras.
//!
//! Given a finite set of entities and disjunctive constraints between pairs
//! of them drawn from an algebra's finite relation vocabulary, this crate
//! computes the path-consistent closure of the constraint network and
//! reports inconsistency or a tightened set of possibilities.
//!
//! ## Quick start
//!
//! ```rust
//! use qualreas::{algebras, Network};
//!
//! let algebra = algebras::linear_interval()?;
//! let mut net = Network::new(algebra, "example");
//! let x = net.new_entity("X", ["ProperInterval"])?;
//! let y = net.new_entity("Y", ["ProperInterval"])?;
//! let z = net.new_entity("Z", ["ProperInterval"])?;
//! net.add_constraint(x, y, Some("B"))?;
//! net.add_constraint(y, z, Some("D"))?;
//! assert!(net.propagate()?);
//! # Ok::<(), qualreas::QrError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`relation_set`] - [`RelationSet`], a bitset of an algebra's relations
//! - [`algebra`] - [`Algebra`], the relation vocabulary, converse map and composition table
//! - [`entity`] - [`Entity`] and [`EntityId`], the nodes a network constrains
//! - [`network`] - [`Network`], the constraint graph and its path-consistency propagation
//! - [`derive`] - derives an interval algebra from a point algebra
//! - [`algebras`] - the shipped algebras: Allen's interval algebra and its point/branching-time variants, and RCC-8
//! - [`loader`] - the external, serializable description format for algebras and networks
//! - [`naming`] - [`NameGenerator`], a seedable default-name generator for unnamed entities/networks
//! - [`error`] - [`QrError`] and [`QrResult`]

pub mod algebra;
pub mod algebras;
pub mod derive;
pub mod entity;
pub mod error;
pub mod loader;
pub mod naming;
pub mod network;
pub mod relation_set;

pub use algebra::{Algebra, AlgebraCheck, RelationInfo, RelationSpec};
pub use entity::{Entity, EntityId};
pub use error::{QrError, QrResult};
pub use naming::NameGenerator;
pub use network::Network;
pub use relation_set::RelationSet;

/// Library name, from `Cargo.toml`.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library version, from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
