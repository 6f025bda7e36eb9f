//! Todo list domain model.
//!
//! # Responsibility
//! - Define the list/item shapes persisted as one JSON record per list.
//! - Provide in-memory mutation helpers used by the read-modify-write path.
//!
//! # Invariants
//! - A record round-trips without field loss: absent `description`/`items`
//!   stay absent after serialization.
//! - Item ids are unique by convention only; lookups are first-match.
//! - Status changes are not validated against any lifecycle order.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Caller-assigned logical list identifier.
pub type ListId = String;

/// Item identifier, unique only within its owning list.
pub type ItemId = String;

/// Item lifecycle status.
///
/// `Pending -> InProgress -> Done` is the intended order, but any value may
/// be assigned at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    /// Created but not started.
    #[default]
    #[serde(rename = "PENDING")]
    Pending,
    /// Work is in progress.
    #[serde(rename = "IN-PROGRESS")]
    InProgress,
    /// Completed.
    #[serde(rename = "DONE")]
    Done,
}

impl ItemStatus {
    /// Wire/storage name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN-PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ListValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "IN-PROGRESS" | "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            _ => Err(ListValidationError::InvalidStatus(value.to_string())),
        }
    }
}

/// Validation failures for list/item input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListValidationError {
    EmptyListId,
    EmptyListName,
    EmptyItemId,
    InvalidStatus(String),
}

impl Display for ListValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyListId => write!(f, "list id cannot be empty"),
            Self::EmptyListName => write!(f, "list name cannot be empty"),
            Self::EmptyItemId => write!(f, "item id cannot be empty"),
            Self::InvalidStatus(value) => write!(
                f,
                "invalid item status `{value}`; expected PENDING|IN-PROGRESS|DONE"
            ),
        }
    }
}

impl Error for ListValidationError {}

/// One unit of work inside a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub status: ItemStatus,
}

impl Item {
    /// Creates an item in the initial `PENDING` state.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: ItemStatus::Pending,
        }
    }

    /// Applies the supplied fields of `patch`, leaving the rest untouched.
    pub fn apply_patch(&mut self, patch: &ItemPatch) {
        if let Some(name) = non_empty(&patch.name) {
            self.name = name.to_string();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// A named, optionally described collection of items.
///
/// Serialized as one record:
/// `{ "id", "name", "description"?, "items"?: [ { "id", "name", "status" } ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `None` for records that never had an item sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
}

impl TodoList {
    /// Creates a list without description or item sequence.
    pub fn new(id: impl Into<ListId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            items: None,
        }
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks fields required before the list may be persisted.
    pub fn validate(&self) -> Result<(), ListValidationError> {
        if self.id.trim().is_empty() {
            return Err(ListValidationError::EmptyListId);
        }
        if self.name.trim().is_empty() {
            return Err(ListValidationError::EmptyListName);
        }
        Ok(())
    }

    /// Items in insertion order; empty when the sequence is absent.
    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Appends an item, initializing the sequence when absent.
    pub fn push_item(&mut self, item: Item) {
        self.items.get_or_insert_with(Vec::new).push(item);
    }

    /// First item whose id equals `item_id`.
    pub fn find_item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items
            .as_mut()?
            .iter_mut()
            .find(|item| item.id == item_id)
    }

    /// Removes the first item whose id equals `item_id`.
    pub fn remove_item(&mut self, item_id: &str) -> Option<Item> {
        let items = self.items.as_mut()?;
        let position = items.iter().position(|item| item.id == item_id)?;
        Some(items.remove(position))
    }

    /// Applies the supplied fields of `patch`, leaving the rest untouched.
    pub fn apply_patch(&mut self, patch: &ListPatch) {
        if let Some(name) = non_empty(&patch.name) {
            self.name = name.to_string();
        }
        if let Some(description) = non_empty(&patch.description) {
            self.description = Some(description.to_string());
        }
    }
}

/// Partial update for list-level fields.
///
/// `None` and empty strings both mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ListPatch {
    /// Whether applying this patch can change anything.
    pub fn is_empty(&self) -> bool {
        non_empty(&self.name).is_none() && non_empty(&self.description).is_none()
    }
}

/// Partial update for item-level fields.
///
/// An empty `name` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub status: Option<ItemStatus>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemPatch, ItemStatus, ListPatch, ListValidationError, TodoList};

    #[test]
    fn status_parses_wire_names_and_alias() {
        assert_eq!("PENDING".parse::<ItemStatus>().unwrap(), ItemStatus::Pending);
        assert_eq!(
            "in-progress".parse::<ItemStatus>().unwrap(),
            ItemStatus::InProgress
        );
        assert_eq!(
            "IN_PROGRESS".parse::<ItemStatus>().unwrap(),
            ItemStatus::InProgress
        );
        assert_eq!(" done ".parse::<ItemStatus>().unwrap(), ItemStatus::Done);
    }

    #[test]
    fn status_rejects_unknown_value() {
        let err = "archived".parse::<ItemStatus>().unwrap_err();
        assert_eq!(err, ListValidationError::InvalidStatus("archived".to_string()));
    }

    #[test]
    fn list_patch_ignores_empty_strings() {
        let mut list = TodoList::new("L1", "Groceries").with_description("weekly");
        let patch = ListPatch {
            name: Some(String::new()),
            description: Some(String::new()),
        };
        assert!(patch.is_empty());

        list.apply_patch(&patch);
        assert_eq!(list.name, "Groceries");
        assert_eq!(list.description.as_deref(), Some("weekly"));
    }

    #[test]
    fn item_patch_can_move_status_backwards() {
        let mut item = Item::new("I1", "Milk");
        item.status = ItemStatus::Done;

        item.apply_patch(&ItemPatch {
            name: None,
            status: Some(ItemStatus::Pending),
        });
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.name, "Milk");
    }

    #[test]
    fn remove_item_removes_first_duplicate_only() {
        let mut list = TodoList::new("L1", "Groceries");
        list.push_item(Item::new("I1", "first"));
        list.push_item(Item::new("I1", "second"));

        let removed = list.remove_item("I1").unwrap();
        assert_eq!(removed.name, "first");
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].name, "second");
    }

    #[test]
    fn remove_item_without_sequence_returns_none() {
        let mut list = TodoList::new("L1", "Groceries");
        assert!(list.remove_item("I1").is_none());
        assert!(list.items.is_none());
    }
}
