use std::{io, path::PathBuf};

use thiserror::Error;

/// Root causes surfaced by the audit passes.
///
/// Public functions return `anyhow::Result`; use `downcast_ref::<AuditError>()`
/// on the error to recover the kind.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("cannot open {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path:?} has no header row")]
    MissingHeader { path: PathBuf },

    #[error("{path:?} repeats column `{column}` in its header")]
    DuplicateColumn { path: PathBuf, column: String },

    #[error("row {row} has no `{field}` field")]
    MissingField { field: String, row: usize },

    #[error("refusing to overwrite source file {path:?}")]
    SameInputOutput { path: PathBuf },

    #[error("invalid config value for {key}: {value:?}")]
    Config { key: &'static str, value: String },
}
