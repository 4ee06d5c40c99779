//! CLI support for pcs-lang
//!
//! Provides programmatic access to the `pcs` commands so other tools can
//! validate documents and answer activation queries without spawning the
//! binary.

mod check;
mod convert;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::json_to_assignments;
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load document: {0}")]
    Load(#[from] crate::LoadError),

    #[error("evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    #[error("store error: {0}")]
    Store(#[from] crate::StoreError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration that is valid JSON but not a flat object of scalars
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// `active` invoked without a configuration
    #[error("no configuration provided. Use --config or pipe JSON to stdin.")]
    NoConfig,

    #[error("unknown category: '{0}'\nRun 'pcs docs' to see available categories.")]
    UnknownCategory(String),
}
