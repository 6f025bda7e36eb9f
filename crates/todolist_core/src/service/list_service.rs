//! List use-case service.
//!
//! # Responsibility
//! - Provide the five list/item entry points used by the request layer.
//! - Normalize caller input before it reaches the repository.
//! - Emit one metadata-only log event per operation.
//!
//! # Invariants
//! - Repository error semantics pass through unchanged.
//! - Names and descriptions are never logged.

use crate::model::todo_list::{ItemPatch, ListPatch, TodoList};
use crate::repo::list_repo::{
    ItemAdded, ItemDeleted, ItemUpdated, ListRepository, RepoError, RepoResult,
};
use log::{debug, error, info};
use std::time::Instant;

/// Use-case service wrapper for list operations.
pub struct ListService<R: ListRepository> {
    repo: R,
}

impl<R: ListRepository> ListService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates (or overwrites) the list stored under `id`.
    ///
    /// # Contract
    /// - `id` and `name` are trimmed; both must be non-empty afterwards.
    /// - An existing record at the same key is replaced without error.
    pub fn create_list(
        &self,
        id: &str,
        name: &str,
        description: Option<&str>,
    ) -> RepoResult<TodoList> {
        let started_at = Instant::now();
        let result = self.repo.create_list(id.trim(), name.trim(), description);
        log_outcome("list_create", started_at, &result);
        result
    }

    /// Patches a list and returns every list visited by the scan.
    pub fn rename_list(&self, id: &str, patch: &ListPatch) -> RepoResult<Vec<TodoList>> {
        let started_at = Instant::now();
        let patch = ListPatch {
            name: patch.name.as_deref().map(|name| name.trim().to_string()),
            description: patch.description.clone(),
        };
        let result = self.repo.rename_list(id.trim(), &patch);
        if let Ok(lists) = &result {
            debug!("event=list_rename module=service scanned={}", lists.len());
        }
        log_outcome("list_rename", started_at, &result);
        result
    }

    /// Lists every readable list.
    pub fn list_all(&self) -> RepoResult<Vec<TodoList>> {
        let started_at = Instant::now();
        let result = self.repo.list_all();
        if let Ok(lists) = &result {
            debug!("event=list_all module=service count={}", lists.len());
        }
        log_outcome("list_all", started_at, &result);
        result
    }

    /// Appends a new `PENDING` item.
    pub fn add_item(&self, list_id: &str, item_id: &str, name: &str) -> RepoResult<ItemAdded> {
        let started_at = Instant::now();
        let result = self
            .repo
            .add_item(list_id.trim(), item_id.trim(), name.trim());
        log_outcome("item_add", started_at, &result);
        result
    }

    /// Patches one item's name and/or status.
    pub fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> RepoResult<ItemUpdated> {
        let started_at = Instant::now();
        let patch = ItemPatch {
            name: patch.name.as_deref().map(|name| name.trim().to_string()),
            status: patch.status,
        };
        let result = self.repo.update_item(list_id.trim(), item_id.trim(), &patch);
        log_outcome("item_update", started_at, &result);
        result
    }

    /// Removes one item.
    pub fn delete_item(&self, list_id: &str, item_id: &str) -> RepoResult<ItemDeleted> {
        let started_at = Instant::now();
        let result = self.repo.delete_item(list_id.trim(), item_id.trim());
        log_outcome("item_delete", started_at, &result);
        result
    }
}

fn log_outcome<T>(event: &str, started_at: Instant, result: &RepoResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event={event} module=service status=ok duration_ms={duration_ms}"),
        Err(err @ (RepoError::ListNotFound(_) | RepoError::ItemNotFound { .. })) => info!(
            "event={event} module=service status=not_found duration_ms={duration_ms} scope={}",
            not_found_scope(err)
        ),
        Err(RepoError::Validation(err)) => info!(
            "event={event} module=service status=rejected duration_ms={duration_ms} error={err}"
        ),
        Err(err) => error!(
            "event={event} module=service status=error duration_ms={duration_ms} error={err}"
        ),
    }
}

fn not_found_scope(err: &RepoError) -> &'static str {
    match err {
        RepoError::ItemNotFound { .. } => "item",
        _ => "list",
    }
}
