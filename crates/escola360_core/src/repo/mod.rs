//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage port the library store is written against.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Business logic never touches the storage medium except through
//!   [`kv_repo::KeyValueStore`].

pub mod kv_repo;
