use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarmonyError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No artifact matching '{template}' found in {location:?}")]
    NotFound { location: PathBuf, template: String },

    #[error("Not implemented: {0}")]
    Unimplemented(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error in {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Rollback of {archived:?} to {original:?} failed: {source}")]
    RollbackFailed {
        archived: PathBuf,
        original: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarmonyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Malformed manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Loader for manifest version '{0}' not implemented")]
    Unimplemented(String),

    #[error(transparent)]
    Version(#[from] HarmonyError),
}
