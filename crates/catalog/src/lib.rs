//! # Intent Catalog
//!
//! Static tool metadata consumed by `intent-router`.
//!
//! A [`Catalog`] is an ordered list of [`ToolEntry`] values plus two alias
//! tables (tool aliases and parameter aliases). It can be assembled in code,
//! collected from [`ToolDescriptor`] providers, or loaded from TOML:
//!
//! ```toml
//! schema_version = 1
//!
//! [[tools]]
//! name = "skeleton"
//! description = "Extract code structure showing classes and functions"
//! keywords = ["structure", "outline"]
//! parameters = ["file_path"]
//!
//! [tool_aliases]
//! skel = "skeleton"
//!
//! [parameter_aliases]
//! path = "file_path"
//! ```
//!
//! The catalog does no scoring and no alias resolution of its own.

mod builtin;
mod catalog;
mod entry;
mod error;

pub use catalog::{Catalog, CATALOG_SCHEMA_VERSION};
pub use entry::{ToolDescriptor, ToolEntry};
pub use error::{CatalogError, Result};
