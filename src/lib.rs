//! Tracks locally installed versioned artifacts and updates them in place.
//!
//! # Modules
//!
//! - [`version`]: `major.minor.patch` parsing and ordering
//! - [`artifact`]: naming templates and directory scans
//! - [`tool`]: tool descriptors and the registry built from them
//! - [`update`]: check/update state machine with rollback
//! - [`manifest`]: remote version manifests
//! - [`config`]: default paths and constants
//! - [`logging`]: tracing setup for the CLI
//! - [`error`]: error types

pub mod artifact;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod tool;
pub mod update;
pub mod version;

pub use error::{HarmonyError, ManifestError};
