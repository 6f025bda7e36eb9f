//! Record store adapter over the key-value engine.
//!
//! # Responsibility
//! - Expose whole-record `put`/`get`/`delete`/`scan` over string keys.
//! - Keep SQL details out of the repository layer.
//!
//! # Invariants
//! - The adapter contains no business logic and never inspects record content.
//! - Every call is a single attempt; failures surface as `StoreError`.

pub mod record_store;
