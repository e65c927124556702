//! In-memory index over parent-linked records.
//!
//! [`domain::TreeStore`] answers point lookups, direct children, whole
//! subtrees, ancestor chains and data paths, and keeps its views consistent
//! across inserts, cascading deletes and reparenting updates.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
