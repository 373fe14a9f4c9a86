use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog or game metadata failed to load
    #[error("Catalog error: {0}")]
    Catalog(#[from] leaguegen_catalog::CatalogError),

    /// A patch source file failed to parse
    #[error("Patch error in {path}: {source}")]
    Patch {
        path: String,
        source: leaguegen_core::PatchError,
    },

    /// JSON serialization or parsing failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn patch(path: impl Into<String>, source: leaguegen_core::PatchError) -> Self {
        Self::Patch {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
