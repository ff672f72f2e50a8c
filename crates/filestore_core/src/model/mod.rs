//! Entity binding contracts for stored record types.
//!
//! # Responsibility
//! - Define how a record type exposes its identifier and its store name.
//! - Keep identifier resolution a compile-time capability of the type.
//!
//! # Invariants
//! - Every stored type declares exactly one identifier accessor.
//! - The store name is type-level metadata; no instance is needed to resolve it.

pub mod entity;
