//! Command dispatch

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{load_store, ApplicationError, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Key, TreeItem, TreeStore};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Config { command }) => cmd_config(command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(command) => {
            let settings = load_settings()?;
            let store = open_store(cli.file.as_deref(), &settings)?;
            run_query(command, store, &settings)
        }
        None => Ok(()),
    }
}

fn current_dir() -> CliResult<PathBuf> {
    Ok(std::env::current_dir().with_path_context("resolve working directory", Path::new("."))?)
}

fn load_settings() -> CliResult<Settings> {
    let dir = current_dir()?;
    Ok(Settings::load(Some(dir.as_path()))?)
}

/// `--file` wins over the configured `data_file`.
fn open_store(file: Option<&Path>, settings: &Settings) -> CliResult<TreeStore> {
    let path = file
        .map(Path::to_path_buf)
        .or_else(|| settings.data_file.clone())
        .ok_or_else(|| {
            CliError::Usage("no record file: pass --file or set data_file in config".into())
        })?;
    debug!("record file: {}", path.display());
    Ok(load_store(&path)?)
}

#[instrument(level = "debug", skip(store, settings))]
fn run_query(command: &Commands, mut store: TreeStore, settings: &Settings) -> CliResult<()> {
    if let Commands::Remove { id } = command {
        let removed = remove_preview(&mut store, id);
        output::header(&format!(
            "removing {} drops {} record(s)",
            id,
            removed.len()
        ));
        for item in &removed {
            output::diff_remove(&output::format_item(item));
        }
        output::info(&format!("{} record(s) remain", store.len()));
        return Ok(());
    }

    for line in query_lines(command, &store, settings)? {
        output::info(&line);
    }
    Ok(())
}

/// Output lines of a read-only query.
///
/// Only `get` fails on an unknown id; the other queries print nothing for it.
pub fn query_lines(
    command: &Commands,
    store: &TreeStore,
    settings: &Settings,
) -> CliResult<Vec<String>> {
    let lines = match command {
        Commands::List => format_all(store.get_all().iter().map(Rc::as_ref)),
        Commands::Get { id } => {
            let item = store
                .get_item(id)
                .ok_or_else(|| ApplicationError::ItemNotFound(id.clone()))?;
            vec![output::format_item(item)]
        }
        Commands::Roots => format_all(store.roots().iter().map(Rc::as_ref)),
        Commands::Children { id } => format_all(store.get_children(id).iter().map(Rc::as_ref)),
        Commands::Descendants { id } => format_all(store.get_all_children(id)),
        Commands::Ancestors { id } => format_all(store.get_all_parents(id)),
        Commands::Path { id } => {
            let path = store.get_data_path(id);
            if path.is_empty() {
                Vec::new()
            } else {
                vec![path.iter().join(&settings.path_separator)]
            }
        }
        Commands::Remove { .. } | Commands::Config { .. } | Commands::Completion { .. } => {
            return Err(CliError::InvalidArgs(format!("not a query: {:?}", command)));
        }
    };
    Ok(lines)
}

fn format_all<'a>(items: impl IntoIterator<Item = &'a TreeItem>) -> Vec<String> {
    items.into_iter().map(output::format_item).collect()
}

/// Apply the cascading delete in memory; returns the dropped records in file order.
pub fn remove_preview(store: &mut TreeStore, id: &Key) -> Vec<Rc<TreeItem>> {
    let before: Vec<Rc<TreeItem>> = store.get_all().to_vec();

    store.remove_item(id);

    let kept: HashSet<*const TreeItem> = store.get_all().iter().map(Rc::as_ptr).collect();
    before
        .into_iter()
        .filter(|item| !kept.contains(&Rc::as_ptr(item)))
        .collect()
}

fn cmd_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings()?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::warning("no config directory for this platform"),
            }
            output::info(&format!(
                "local:  {}",
                local_config_path(&current_dir()?).display()
            ));
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TreeStore {
        TreeStore::new(vec![
            TreeItem::new(1, None, "Item 1"),
            TreeItem::new("91064cee", Some(1.into()), "Item 2"),
            TreeItem::new(3, Some(1.into()), "Item 3"),
            TreeItem::new(4, Some("91064cee".into()), "Item 4"),
            TreeItem::new(5, Some("91064cee".into()), "Item 5"),
            TreeItem::new(6, Some("91064cee".into()), "Item 6"),
            TreeItem::new(7, Some(4.into()), "Item 7"),
            TreeItem::new(8, Some(4.into()), "Item 8"),
            TreeItem::new(9, Some("missing".into()), "Orphan"),
        ])
    }

    fn lines(command: Commands) -> CliResult<Vec<String>> {
        query_lines(&command, &store(), &Settings::default())
    }

    fn first_column(lines: &[String]) -> Vec<&str> {
        lines
            .iter()
            .filter_map(|line| line.split('\t').next())
            .collect()
    }

    #[test]
    fn given_numeric_id_when_getting_then_prints_record() {
        let out = lines(Commands::Get { id: Key::Int(1) }).unwrap();
        assert_eq!(out, vec!["1\t-\tItem 1"]);
    }

    #[test]
    fn given_unknown_id_when_getting_then_item_not_found() {
        let err = lines(Commands::Get { id: Key::Int(2) }).unwrap_err();
        assert!(matches!(
            err,
            CliError::Application(ApplicationError::ItemNotFound(_))
        ));
    }

    #[test]
    fn given_dangling_parent_when_listing_children_then_prints_orphans() {
        let out = lines(Commands::Children { id: Key::from("missing") }).unwrap();
        assert_eq!(first_column(&out), vec!["9"]);
    }

    #[test]
    fn given_unknown_id_when_querying_then_prints_nothing() {
        let unknown = Key::Int(42);
        for command in [
            Commands::Children { id: unknown.clone() },
            Commands::Descendants { id: unknown.clone() },
            Commands::Ancestors { id: unknown.clone() },
            Commands::Path { id: unknown.clone() },
        ] {
            assert!(lines(command).unwrap().is_empty());
        }
    }

    #[test]
    fn given_node_when_listing_descendants_then_level_order() {
        let out = lines(Commands::Descendants { id: Key::Int(1) }).unwrap();
        assert_eq!(
            first_column(&out),
            vec!["91064cee", "3", "4", "5", "6", "7", "8"]
        );
    }

    #[test]
    fn given_leaf_when_listing_ancestors_then_self_first() {
        let out = lines(Commands::Ancestors { id: Key::Int(7) }).unwrap();
        assert_eq!(first_column(&out), vec!["7", "4", "91064cee", "1"]);
    }

    #[test]
    fn given_separator_when_printing_path_then_joins_ids() {
        let settings = Settings {
            data_file: None,
            path_separator: " > ".into(),
        };
        let out = query_lines(&Commands::Path { id: Key::Int(8) }, &store(), &settings).unwrap();
        assert_eq!(out, vec!["1 > 91064cee > 4 > 8"]);
    }

    #[test]
    fn given_store_when_listing_roots_then_only_parentless_records() {
        let out = lines(Commands::Roots).unwrap();
        assert_eq!(first_column(&out), vec!["1"]);
    }

    #[test]
    fn given_remove_command_when_querying_then_invalid_args() {
        let err = lines(Commands::Remove { id: Key::Int(4) }).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgs(_)));
    }

    #[test]
    fn given_interior_node_when_previewing_remove_then_returns_subtree() {
        let mut store = store();

        let removed = remove_preview(&mut store, &Key::Int(4));

        let ids: Vec<String> = removed.iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["4", "7", "8"]);
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn given_unknown_id_when_previewing_remove_then_nothing_dropped() {
        let mut store = store();

        let removed = remove_preview(&mut store, &Key::from("4"));

        assert!(removed.is_empty());
        assert_eq!(store.len(), 9);
    }
}
