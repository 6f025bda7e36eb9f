//! List repository contracts and scan-based implementation.
//!
//! # Responsibility
//! - Locate lists by logical id through a full store scan.
//! - Apply list/item mutations in memory and persist the whole record back.
//!
//! # Invariants
//! - Updates are written under the storage key the record was found under,
//!   never under the logical id.
//! - `add_item`, `update_item` and `delete_item` act on the first matching
//!   list in scan order; `rename_list` patches every match.
//! - Records that fail to deserialize are skipped with a warning and never
//!   rewritten.
//! - No in-process state survives between calls; every operation re-scans.
//!
//! Concurrent read-modify-write on one list is not coordinated: the later
//! put wins and the earlier mutation is lost.

use crate::model::todo_list::{
    Item, ItemPatch, ItemStatus, ListId, ListPatch, ListValidationError, TodoList,
};
use crate::store::record_store::{RecordStore, StoreError, StoredRecord};
use log::warn;
use serde::Serialize;
use serde_json::error::Category;
use std::error::Error;
use std::fmt::{Display, Formatter};

const LIST_NOT_FOUND_MESSAGE: &str = "List not found";
const ITEM_NOT_FOUND_MESSAGE: &str = "Item not found";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from list repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// No stored list carries the requested logical id.
    ListNotFound(ListId),
    /// The list exists but holds no item with the requested id.
    ItemNotFound { list_id: ListId, item_id: String },
    Validation(ListValidationError),
    Store(StoreError),
    /// A list could not be encoded for persistence.
    Serialize(serde_json::Error),
}

impl RepoError {
    /// Human-readable not-found message, `None` for other error kinds.
    pub fn not_found_message(&self) -> Option<&'static str> {
        match self {
            Self::ListNotFound(_) => Some(LIST_NOT_FOUND_MESSAGE),
            Self::ItemNotFound { .. } => Some(ITEM_NOT_FOUND_MESSAGE),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.not_found_message().is_some()
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListNotFound(_) => f.write_str(LIST_NOT_FOUND_MESSAGE),
            Self::ItemNotFound { .. } => f.write_str(ITEM_NOT_FOUND_MESSAGE),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode list record: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::ListNotFound(_) | Self::ItemNotFound { .. } => None,
        }
    }
}

impl From<ListValidationError> for RepoError {
    fn from(value: ListValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Result of appending an item to a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAdded {
    pub list_id: ListId,
    pub item_id: String,
    pub name: String,
    pub status: ItemStatus,
}

/// Result of patching an item; carries the item's values after the patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdated {
    pub list_id: ListId,
    pub item_id: String,
    pub name: String,
    pub status: ItemStatus,
}

/// Result of removing an item from a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDeleted {
    pub list_id: ListId,
    pub item_id: String,
}

/// Repository interface for todo lists and their nested items.
pub trait ListRepository {
    /// Writes a new list keyed by `id`, overwriting any record at that key.
    fn create_list(
        &self,
        id: &str,
        name: &str,
        description: Option<&str>,
    ) -> RepoResult<TodoList>;
    /// Patches every list whose id matches and returns all scanned lists.
    fn rename_list(&self, id: &str, patch: &ListPatch) -> RepoResult<Vec<TodoList>>;
    /// Returns every readable list in storage-key order.
    fn list_all(&self) -> RepoResult<Vec<TodoList>>;
    /// Appends a `PENDING` item to the first matching list.
    fn add_item(&self, list_id: &str, item_id: &str, name: &str) -> RepoResult<ItemAdded>;
    /// Patches the first matching item of the first matching list.
    fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> RepoResult<ItemUpdated>;
    /// Removes the first matching item of the first matching list.
    fn delete_item(&self, list_id: &str, item_id: &str) -> RepoResult<ItemDeleted>;
}

/// List repository that resolves logical ids by scanning the record store.
pub struct ScanListRepository<S: RecordStore> {
    store: S,
}

/// A decoded list plus the storage key it was read from.
struct LocatedList {
    key: String,
    list: TodoList,
}

impl<S: RecordStore> ScanListRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Decodes every readable record, in scan order.
    fn scan_lists(&self) -> RepoResult<Vec<LocatedList>> {
        Ok(self
            .store
            .scan()?
            .into_iter()
            .filter_map(decode_record)
            .collect())
    }

    /// First list whose logical id equals `list_id`; decoding stops at the match.
    fn find_first(&self, list_id: &str) -> RepoResult<Option<LocatedList>> {
        Ok(self
            .store
            .scan()?
            .into_iter()
            .filter_map(decode_record)
            .find(|located| located.list.id == list_id))
    }

    fn require_list(&self, list_id: &str) -> RepoResult<LocatedList> {
        self.find_first(list_id)?
            .ok_or_else(|| RepoError::ListNotFound(list_id.to_string()))
    }

    fn persist(&self, key: &str, list: &TodoList) -> RepoResult<()> {
        let record = serde_json::to_string(list)?;
        self.store.put(key, &record)?;
        Ok(())
    }
}

impl<S: RecordStore> ListRepository for ScanListRepository<S> {
    fn create_list(
        &self,
        id: &str,
        name: &str,
        description: Option<&str>,
    ) -> RepoResult<TodoList> {
        let mut list = TodoList::new(id, name);
        list.description = description.map(str::to_string);
        list.validate()?;

        self.persist(&list.id, &list)?;
        Ok(list)
    }

    fn rename_list(&self, id: &str, patch: &ListPatch) -> RepoResult<Vec<TodoList>> {
        let mut updated = false;
        let mut lists = Vec::new();

        for LocatedList { key, mut list } in self.scan_lists()? {
            if list.id == id {
                list.apply_patch(patch);
                self.persist(&key, &list)?;
                updated = true;
            }
            lists.push(list);
        }

        if !updated {
            return Err(RepoError::ListNotFound(id.to_string()));
        }
        Ok(lists)
    }

    fn list_all(&self) -> RepoResult<Vec<TodoList>> {
        Ok(self
            .scan_lists()?
            .into_iter()
            .map(|located| located.list)
            .collect())
    }

    fn add_item(&self, list_id: &str, item_id: &str, name: &str) -> RepoResult<ItemAdded> {
        if item_id.trim().is_empty() {
            return Err(ListValidationError::EmptyItemId.into());
        }

        let LocatedList { key, mut list } = self.require_list(list_id)?;
        let item = Item::new(item_id, name);
        let added = ItemAdded {
            list_id: list.id.clone(),
            item_id: item.id.clone(),
            name: item.name.clone(),
            status: item.status,
        };
        list.push_item(item);

        self.persist(&key, &list)?;
        Ok(added)
    }

    fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> RepoResult<ItemUpdated> {
        let LocatedList { key, mut list } = self.require_list(list_id)?;
        let item = list
            .find_item_mut(item_id)
            .ok_or_else(|| RepoError::ItemNotFound {
                list_id: list_id.to_string(),
                item_id: item_id.to_string(),
            })?;
        item.apply_patch(patch);
        let updated = ItemUpdated {
            list_id: list_id.to_string(),
            item_id: item.id.clone(),
            name: item.name.clone(),
            status: item.status,
        };

        self.persist(&key, &list)?;
        Ok(updated)
    }

    fn delete_item(&self, list_id: &str, item_id: &str) -> RepoResult<ItemDeleted> {
        let LocatedList { key, mut list } = self.require_list(list_id)?;
        if list.remove_item(item_id).is_none() {
            return Err(RepoError::ItemNotFound {
                list_id: list_id.to_string(),
                item_id: item_id.to_string(),
            });
        }

        self.persist(&key, &list)?;
        Ok(ItemDeleted {
            list_id: list_id.to_string(),
            item_id: item_id.to_string(),
        })
    }
}

fn decode_record(record: StoredRecord) -> Option<LocatedList> {
    match serde_json::from_str::<TodoList>(&record.value) {
        Ok(list) => Some(LocatedList {
            key: record.key,
            list,
        }),
        Err(err) => {
            warn!(
                "event=record_skipped module=repo status=error key={} error_code=record_decode_failed {}",
                record.key,
                decode_error_summary(&err)
            );
            None
        }
    }
}

// serde_json messages quote offending values; keep only category and position.
fn decode_error_summary(err: &serde_json::Error) -> String {
    let category = match err.classify() {
        Category::Io => "io",
        Category::Syntax => "syntax",
        Category::Data => "data",
        Category::Eof => "eof",
    };
    format!(
        "error_category={category} line={} column={}",
        err.line(),
        err.column()
    )
}

#[cfg(test)]
mod tests {
    use super::decode_error_summary;
    use crate::model::todo_list::TodoList;

    #[test]
    fn decode_error_summary_omits_record_content() {
        let err = serde_json::from_str::<TodoList>(
            r#"{"id":"L9","name":"x","items":"SECRET-CONTENT"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("SECRET-CONTENT"));

        let summary = decode_error_summary(&err);
        assert!(!summary.contains("SECRET-CONTENT"));
        assert!(!summary.contains("L9"));
        assert_eq!(summary, "error_category=data line=1 column=46");
    }

    #[test]
    fn decode_error_summary_reports_syntax_errors() {
        let err = serde_json::from_str::<TodoList>("{not json").unwrap_err();
        assert!(decode_error_summary(&err).starts_with("error_category=syntax line=1 "));
    }
}
