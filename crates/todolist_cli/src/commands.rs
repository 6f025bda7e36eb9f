//! Dispatch of parsed commands onto the list service.

use crate::config::Command;
use crate::envelope::Response;
use todolist_core::{ListRepository, ListService};
use uuid::Uuid;

/// Runs one command and renders its outcome.
pub fn execute<R: ListRepository>(service: &ListService<R>, command: Command) -> Response {
    let result = match command {
        Command::Lists => service.list_all().map(|lists| Response::data(&lists)),
        Command::CreateList(args) => {
            let id = args.id.unwrap_or_else(generate_id);
            service
                .create_list(&id, &args.name, args.description.as_deref())
                .map(|list| Response::data(&list))
        }
        Command::RenameList(args) => service
            .rename_list(&args.id, &args.patch())
            .map(|lists| Response::data(&lists)),
        Command::AddItem(args) => {
            let item_id = args.item_id.unwrap_or_else(generate_id);
            service
                .add_item(&args.list_id, &item_id, &args.name)
                .map(|added| Response::data(&added))
        }
        Command::UpdateItem(args) => service
            .update_item(&args.list_id, &args.item_id, &args.patch())
            .map(|updated| Response::data(&updated)),
        Command::DeleteItem(args) => service
            .delete_item(&args.list_id, &args.item_id)
            .map(|deleted| Response::data(&deleted)),
    };

    result.unwrap_or_else(|err| Response::from_repo_error(&err))
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
