//! Record loading
//!
//! Reads the initial record list from a TOML file:
//!
//! ```toml
//! [[items]]
//! id = 1
//! label = "Item 1"
//!
//! [[items]]
//! id = "91064cee"
//! parent = 1
//! label = "Item 2"
//! ```
//!
//! Records are handed to the store as-is; ids are not checked for uniqueness.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{TreeItem, TreeStore};

/// On-disk layout of a record file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFile {
    #[serde(default)]
    pub items: Vec<TreeItem>,
}

/// Parse records from TOML content. `path` is only used for error messages.
pub fn parse_items(content: &str, path: &Path) -> ApplicationResult<Vec<TreeItem>> {
    let file: RecordFile = toml::from_str(content).map_err(|e| ApplicationError::Load {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    debug!("parsed {} records", file.items.len());
    Ok(file.items)
}

/// Read and parse a record file.
#[instrument(level = "debug")]
pub fn load_items(path: &Path) -> ApplicationResult<Vec<TreeItem>> {
    if !path.is_file() {
        return Err(ApplicationError::Load {
            path: path.to_path_buf(),
            message: "not a file".to_string(),
        });
    }
    let content = fs::read_to_string(path).with_path_context("read records", path)?;
    parse_items(&content, path)
}

/// Read a record file and index it.
pub fn load_store(path: &Path) -> ApplicationResult<TreeStore> {
    let items = load_items(path)?;
    info!("loaded {} records from {}", items.len(), path.display());
    Ok(TreeStore::new(items))
}
