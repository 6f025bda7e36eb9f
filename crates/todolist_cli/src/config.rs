//! Command-line configuration.
//!
//! # Responsibility
//! - Parse global options and the requested list operation.
//! - Resolve each option from flag, then environment, then default.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use todolist_core::{ItemPatch, ItemStatus, ListPatch};

pub const DEFAULT_DB_FILE_NAME: &str = "todolist.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "todolist")]
#[command(about = "Manage todo lists stored in a local record store")]
#[command(version)]
pub struct Cli {
    /// Record store database file.
    #[arg(long, global = true, env = "TODOLIST_DB", default_value = DEFAULT_DB_FILE_NAME)]
    pub db: PathBuf,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "TODOLIST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true, env = "TODOLIST_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Print every list.
    Lists,
    /// Create a list, overwriting any list stored under the same id.
    CreateList(CreateListArgs),
    /// Patch a list's name and/or description.
    RenameList(RenameListArgs),
    /// Append a PENDING item to a list.
    AddItem(AddItemArgs),
    /// Patch an item's name and/or status.
    UpdateItem(UpdateItemArgs),
    /// Remove an item from a list.
    DeleteItem(ItemRefArgs),
}

#[derive(Debug, Args, PartialEq, Eq)]
pub struct CreateListArgs {
    /// Generated when omitted.
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Args, PartialEq, Eq)]
pub struct RenameListArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl RenameListArgs {
    pub fn patch(&self) -> ListPatch {
        ListPatch {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Args, PartialEq, Eq)]
pub struct AddItemArgs {
    pub list_id: String,
    /// Generated when omitted.
    #[arg(long)]
    pub item_id: Option<String>,
    #[arg(long)]
    pub name: String,
}

#[derive(Debug, Args, PartialEq, Eq)]
pub struct UpdateItemArgs {
    pub list_id: String,
    pub item_id: String,
    #[arg(long)]
    pub name: Option<String>,
    /// PENDING|IN-PROGRESS|DONE
    #[arg(long)]
    pub status: Option<ItemStatus>,
}

impl UpdateItemArgs {
    pub fn patch(&self) -> ItemPatch {
        ItemPatch {
            name: self.name.clone(),
            status: self.status,
        }
    }
}

#[derive(Debug, Args, PartialEq, Eq)]
pub struct ItemRefArgs {
    pub list_id: String,
    pub item_id: String,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, DEFAULT_DB_FILE_NAME};
    use clap::{CommandFactory, FromArgMatches, Parser};
    use std::path::PathBuf;
    use todolist_core::ItemStatus;

    #[test]
    fn parses_update_item_with_status() {
        let cli = Cli::try_parse_from([
            "todolist",
            "update-item",
            "L1",
            "I1",
            "--status",
            "in-progress",
        ])
        .unwrap();

        let Command::UpdateItem(args) = cli.command else {
            panic!("expected update-item");
        };
        assert_eq!(args.list_id, "L1");
        assert_eq!(args.item_id, "I1");
        assert_eq!(args.patch().status, Some(ItemStatus::InProgress));
        assert_eq!(args.patch().name, None);
    }

    #[test]
    fn rejects_unknown_status() {
        let err = Cli::try_parse_from([
            "todolist",
            "update-item",
            "L1",
            "I1",
            "--status",
            "archived",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn db_flag_overrides_default_and_is_global() {
        let cli = Cli::try_parse_from(["todolist", "lists", "--db", "/tmp/lists.sqlite3"]).unwrap();
        assert_eq!(cli.db, PathBuf::from("/tmp/lists.sqlite3"));
        assert_eq!(cli.command, Command::Lists);
    }

    #[test]
    fn create_list_id_is_optional() {
        let cli = Cli::try_parse_from(["todolist", "create-list", "--name", "Groceries"]).unwrap();
        let Command::CreateList(args) = cli.command else {
            panic!("expected create-list");
        };
        assert!(args.id.is_none());
        assert_eq!(args.name, "Groceries");
        assert!(args.description.is_none());
    }

    #[test]
    fn add_item_requires_name() {
        assert!(Cli::try_parse_from(["todolist", "add-item", "L1"]).is_err());
    }

    /// Env fallbacks rebound to per-test names, so tests never share
    /// process environment: `[db, log_level, log_dir]`.
    fn parse_with_env(vars: [&'static str; 3], args: &[&str]) -> Cli {
        let [db_var, level_var, dir_var] = vars;
        let command = Cli::command()
            .mut_arg("db", |arg| arg.env(db_var))
            .mut_arg("log_level", |arg| arg.env(level_var))
            .mut_arg("log_dir", |arg| arg.env(dir_var));
        let matches = command.try_get_matches_from(args).unwrap();
        Cli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let vars = [
            "TODOLIST_TEST_DEFAULTS_DB",
            "TODOLIST_TEST_DEFAULTS_LOG_LEVEL",
            "TODOLIST_TEST_DEFAULTS_LOG_DIR",
        ];
        let cli = parse_with_env(vars, &["todolist", "lists"]);
        assert_eq!(cli.db, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert!(cli.log_level.is_none());
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn env_overrides_default_and_flag_overrides_env() {
        let vars = [
            "TODOLIST_TEST_PRECEDENCE_DB",
            "TODOLIST_TEST_PRECEDENCE_LOG_LEVEL",
            "TODOLIST_TEST_PRECEDENCE_LOG_DIR",
        ];
        std::env::set_var(vars[0], "/tmp/from-env.sqlite3");
        std::env::set_var(vars[1], "warn");

        let from_env = parse_with_env(vars, &["todolist", "lists"]);
        assert_eq!(from_env.db, PathBuf::from("/tmp/from-env.sqlite3"));
        assert_eq!(from_env.log_level.as_deref(), Some("warn"));

        let from_flags = parse_with_env(
            vars,
            &[
                "todolist",
                "--db",
                "/tmp/from-flag.sqlite3",
                "--log-level",
                "debug",
                "lists",
            ],
        );
        assert_eq!(from_flags.db, PathBuf::from("/tmp/from-flag.sqlite3"));
        assert_eq!(from_flags.log_level.as_deref(), Some("debug"));

        std::env::remove_var(vars[0]);
        std::env::remove_var(vars[1]);
    }

    #[test]
    fn cli_declares_documented_env_names() {
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };
        assert_eq!(env_of("db").as_deref(), Some("TODOLIST_DB"));
        assert_eq!(env_of("log_level").as_deref(), Some("TODOLIST_LOG_LEVEL"));
        assert_eq!(env_of("log_dir").as_deref(), Some("TODOLIST_LOG_DIR"));
    }
}
