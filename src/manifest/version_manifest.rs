//! Queries over a loaded version manifest

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{HarmonyError, ManifestError};
use crate::manifest::loader::{self, Manifest};
use crate::version::{SemanticVersion, find_latest};

/// Software grouped by the first field in which two manifests disagree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestComparison {
    pub equal: Vec<String>,
    pub major: Vec<String>,
    pub minor: Vec<String>,
    pub patch: Vec<String>,
}

/// A loaded manifest and the queries run against it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionManifest {
    manifest: Manifest,
}

impl VersionManifest {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        Ok(Self::new(loader::load(content)?))
    }

    pub fn manifest_version(&self) -> u64 {
        self.manifest.manifest_version
    }

    pub fn list_software(&self) -> &IndexMap<String, Vec<String>> {
        &self.manifest.softwares
    }

    /// Published versions in listed order; empty for unknown software
    pub fn get_software_versions(&self, software: &str) -> &[String] {
        self.manifest
            .softwares
            .get(software)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Newest version by value rather than by position in the list
    pub fn get_latest_version(&self, software: &str) -> Result<Option<String>, HarmonyError> {
        find_latest(self.get_software_versions(software))
    }

    /// Classify software listed in both manifests by comparing the last
    /// version each one lists.
    ///
    /// Software missing from `other`, or with no versions on either side, is
    /// left out.
    pub fn compare_version(
        &self,
        other: &VersionManifest,
    ) -> Result<ManifestComparison, HarmonyError> {
        let mut comparison = ManifestComparison::default();

        for (software, versions) in self.list_software() {
            let (Some(ours), Some(theirs)) = (
                versions.last(),
                other.get_software_versions(software).last(),
            ) else {
                continue;
            };

            let ours = SemanticVersion::parse(ours)?;
            let theirs = SemanticVersion::parse(theirs)?;
            let bucket = match ours.compare(&theirs) {
                (false, _, _) => &mut comparison.major,
                (true, false, _) => &mut comparison.minor,
                (true, true, false) => &mut comparison.patch,
                (true, true, true) => &mut comparison.equal,
            };
            bucket.push(software.clone());
        }

        Ok(comparison)
    }
}
