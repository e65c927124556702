//! Domain layer: records and the tree index
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod store;

pub use entities::{Key, TreeItem};
pub use store::TreeStore;
