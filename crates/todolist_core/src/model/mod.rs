//! Domain model for todo lists and their items.
//!
//! # Responsibility
//! - Define the canonical list/item structures used by the repository.
//! - Own the JSON record shape persisted in the record store.
//!
//! # Invariants
//! - A list and all of its items are persisted as one record.
//! - Items never exist outside their owning list.

pub mod todo_list;
