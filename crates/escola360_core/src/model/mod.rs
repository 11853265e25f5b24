//! Document model for curriculum planning.
//!
//! # Responsibility
//! - Define the bimester plan, its units and the artifacts attachable to them.
//! - Define the library envelope and the catalog vocabularies.
//!
//! # Invariants
//! - Serialized shapes are compatible with library collections written by the
//!   web client.
//! - Model types carry no persistence or generation behavior.

pub mod artifact;
pub mod catalog;
pub mod context;
pub mod library;
pub mod plan;
