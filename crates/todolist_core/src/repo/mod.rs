//! Repository layer over the record store.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for lists and items.
//! - Implement lookup-mutate-persist on top of the four store primitives.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`ListNotFound`, `ItemNotFound`)
//!   in addition to store transport errors.
//! - Each mutation is one whole-record put.

pub mod list_repo;
