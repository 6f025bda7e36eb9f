//! Core data-access logic for todo lists.
//! Lists and their items live as whole JSON records in a key-value store and
//! are located by scanning.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo_list::{
    Item, ItemId, ItemPatch, ItemStatus, ListId, ListPatch, ListValidationError, TodoList,
};
pub use repo::list_repo::{
    ItemAdded, ItemDeleted, ItemUpdated, ListRepository, RepoError, RepoResult,
    ScanListRepository,
};
pub use service::list_service::ListService;
pub use store::record_store::{
    RecordStore, SqliteRecordStore, StoreError, StoreResult, StoredRecord,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
