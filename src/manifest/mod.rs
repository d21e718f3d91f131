//! Remote version manifests
//!
//! A manifest maps software names to the versions published for them. Only
//! `manifest_version: 1` documents are understood.
//!
//! - [`loader`]: version-dispatched document loading
//! - [`version_manifest`]: queries over a loaded manifest
//! - [`registry`]: fetching a manifest over HTTP

pub mod loader;
pub mod registry;
pub mod version_manifest;

pub use loader::Manifest;
pub use registry::{HttpManifestRegistry, ManifestRegistry, latest_version_of};
pub use version_manifest::{ManifestComparison, VersionManifest};
