//! Manifest document loading, dispatched on `manifest_version`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ManifestError;

/// A remote catalog of software and the versions published for each
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest_version: u64,
    #[serde(default)]
    pub softwares: IndexMap<String, Vec<String>>,
}

type LoaderFn = fn(&str) -> Result<Manifest, ManifestError>;

/// Supported manifest versions and their loaders
const LOADERS: &[(u64, LoaderFn)] = &[(1, load_version_1)];

#[derive(Debug, Deserialize)]
struct Header {
    manifest_version: Option<serde_yaml::Value>,
}

/// Parse a manifest document with the loader registered for its version
pub fn load(content: &str) -> Result<Manifest, ManifestError> {
    let header: Header = serde_yaml::from_str(content)?;

    let Some(raw_version) = header.manifest_version else {
        return Err(ManifestError::Unimplemented("<missing>".to_string()));
    };

    let loader = raw_version
        .as_u64()
        .and_then(|version| LOADERS.iter().find(|(v, _)| *v == version))
        .map(|(_, loader)| loader);

    match loader {
        Some(loader) => {
            debug!("Loading manifest version {:?}", raw_version);
            loader(content)
        }
        None => Err(ManifestError::Unimplemented(describe(&raw_version))),
    }
}

/// Version 1 documents are taken as they are
fn load_version_1(content: &str) -> Result<Manifest, ManifestError> {
    Ok(serde_yaml::from_str(content)?)
}

fn describe(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}
