//! # Intent Router
//!
//! Deterministic routing from short, imprecise phrases (mistyped tool names,
//! aliases, natural-language descriptions) to one tool of a fixed catalog.
//!
//! ## Pipeline
//!
//! ```text
//! query
//!   │
//!   ├──> exact name match ──────────────> resolved (1.0)
//!   ├──> alias table ───────────────────> resolved (1.0)
//!   ├──> typo correction (opt-in) ──────> resolved (name ratio)
//!   │
//!   └──> tokenizer
//!          ├─> TF-IDF cosine          × 0.40
//!          ├─> keyword overlap        × 0.35
//!          ├─> description similarity × 0.15
//!          └─> name similarity        × 0.10
//!                 │
//!                 └─> composite ≥ 0.85 resolved | ≥ 0.50 suggested | else unresolved
//! ```
//!
//! ## Example
//!
//! ```rust
//! use intent_catalog::{Catalog, ToolEntry};
//! use intent_router::{ResolutionStatus, Router};
//!
//! let catalog = Catalog::from_tools(vec![
//!     ToolEntry::new("skeleton", "Extract code structure showing classes and functions")
//!         .keywords(["structure", "outline"]),
//!     ToolEntry::new("deps", "Show dependency graph").keywords(["imports", "dependencies"]),
//! ])?;
//! let router = Router::new(catalog)?;
//!
//! let exact = router.resolve("skeleton");
//! assert_eq!(exact.status, ResolutionStatus::Resolved);
//!
//! let fuzzy = router.resolve("show me the imports");
//! assert_eq!(fuzzy.tool.as_deref(), Some("deps"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Routing performs no I/O and never mutates shared state. Use
//! [`SharedRouter`] when the catalog can change while queries are running.

mod aliases;
mod config;
mod error;
mod format;
mod params;
mod result;
mod router;
mod scorer;
mod shared;
mod similarity;
mod tfidf;
mod tokenizer;

pub use aliases::AliasTables;
pub use config::{RouterConfig, SignalWeights, Thresholds};
pub use error::{Result, RouterError};
pub use format::format_tool_list;
pub use params::normalize_parameters;
pub use result::{MatchMethod, Resolution, ResolutionStatus, ToolMatch};
pub use router::Router;
pub use scorer::{PreparedQuery, Scorer, SignalScores};
pub use shared::SharedRouter;
pub use similarity::sequence_ratio;
pub use tfidf::{SparseVector, TfIdfIndex};
pub use tokenizer::{name_key, tokenize, words};
