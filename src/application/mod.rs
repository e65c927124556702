//! Application layer: loading records and error plumbing
//!
//! This layer feeds the domain index from files and maps failures into errors.

pub mod error;
pub mod error_ext;
pub mod loader;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use loader::{load_items, load_store, parse_items, RecordFile};
