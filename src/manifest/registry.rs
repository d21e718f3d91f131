//! Fetching manifests from a remote source

#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::config::USER_AGENT;
use crate::error::ManifestError;
use crate::manifest::version_manifest::VersionManifest;

/// Trait for fetching a version manifest
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ManifestRegistry: Send + Sync {
    /// Fetch and load the manifest
    async fn fetch_manifest(&self) -> Result<VersionManifest, ManifestError>;
}

/// Registry implementation fetching a YAML manifest over HTTP
pub struct HttpManifestRegistry {
    client: reqwest::Client,
    url: String,
}

impl HttpManifestRegistry {
    pub fn new(url: &str) -> Result<Self, ManifestError> {
        Ok(Self {
            client: reqwest::Client::builder().user_agent(USER_AGENT).build()?,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl ManifestRegistry for HttpManifestRegistry {
    async fn fetch_manifest(&self) -> Result<VersionManifest, ManifestError> {
        debug!("Fetching manifest from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("Manifest source returned status {}: {}", status, self.url);
            return Err(ManifestError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await?;
        VersionManifest::parse(&body)
    }
}

/// Latest published version of `software` according to the registry
pub async fn latest_version_of<R>(
    registry: &R,
    software: &str,
) -> Result<Option<String>, ManifestError>
where
    R: ManifestRegistry + ?Sized,
{
    let manifest = registry.fetch_manifest().await?;
    Ok(manifest.get_latest_version(software)?)
}
