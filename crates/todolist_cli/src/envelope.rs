//! JSON response envelopes and exit codes.
//!
//! # Invariants
//! - Success prints `{"data": ...}` and exits 0.
//! - Failures print `{"error": "..."}`; the exit code names the failure class.

use serde::Serialize;
use serde_json::{json, Value};
use todolist_core::RepoError;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_INPUT: i32 = 2;
pub const EXIT_NOT_FOUND: i32 = 4;

/// Rendered command outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub body: Value,
    pub exit_code: i32,
}

impl Response {
    pub fn data<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(data) => Self {
                body: json!({ "data": data }),
                exit_code: EXIT_OK,
            },
            Err(err) => Self::failure(format!("failed to encode response: {err}"), EXIT_FAILURE),
        }
    }

    pub fn failure(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            body: json!({ "error": message.into() }),
            exit_code,
        }
    }

    pub fn from_repo_error(err: &RepoError) -> Self {
        let exit_code = match err {
            RepoError::ListNotFound(_) | RepoError::ItemNotFound { .. } => EXIT_NOT_FOUND,
            RepoError::Validation(_) => EXIT_INVALID_INPUT,
            RepoError::Store(_) | RepoError::Serialize(_) => EXIT_FAILURE,
        };
        Self::failure(err.to_string(), exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::{Response, EXIT_INVALID_INPUT, EXIT_NOT_FOUND, EXIT_OK};
    use serde_json::json;
    use todolist_core::{ListValidationError, RepoError, TodoList};

    #[test]
    fn data_wraps_payload() {
        let response = Response::data(&vec![TodoList::new("L1", "Groceries")]);
        assert_eq!(response.exit_code, EXIT_OK);
        assert_eq!(
            response.body,
            json!({ "data": [ { "id": "L1", "name": "Groceries" } ] })
        );
    }

    #[test]
    fn not_found_errors_keep_scope_message() {
        let list = Response::from_repo_error(&RepoError::ListNotFound("L1".to_string()));
        assert_eq!(list.body, json!({ "error": "List not found" }));
        assert_eq!(list.exit_code, EXIT_NOT_FOUND);

        let item = Response::from_repo_error(&RepoError::ItemNotFound {
            list_id: "L1".to_string(),
            item_id: "I1".to_string(),
        });
        assert_eq!(item.body, json!({ "error": "Item not found" }));
        assert_eq!(item.exit_code, EXIT_NOT_FOUND);
    }

    #[test]
    fn validation_errors_are_invalid_input() {
        let response =
            Response::from_repo_error(&RepoError::Validation(ListValidationError::EmptyListName));
        assert_eq!(response.exit_code, EXIT_INVALID_INPUT);
        assert_eq!(response.body, json!({ "error": "list name cannot be empty" }));
    }
}
