//! Core use-case services.
//!
//! # Responsibility
//! - Apply partial updates to plans and orchestrate unit generations.
//! - Persist saved plans through the library store.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod library_service;
pub mod plan_mutation;
pub mod planning_session;
