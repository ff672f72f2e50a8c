//! Repository layer: record store contract and JSON file persistence.
//!
//! # Responsibility
//! - Define the CRUD contract callers depend on.
//! - Isolate file layout and encoding from callers.
//!
//! # Invariants
//! - Writes never persist an entity with a blank identifier.
//! - The store file is the single source of truth at call granularity.
//!
//! # See also
//! - DESIGN.md (error policy per operation)

pub mod error;
pub mod exclusive;
pub mod record_repo;
