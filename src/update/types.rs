//! Results of locating, checking, and applying an update

use std::path::PathBuf;

use serde::Serialize;

use crate::artifact::Matcher;
use crate::version::SemanticVersion;

/// The artifact currently installed for a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentArtifact {
    pub filename: String,
    pub version: SemanticVersion,
    #[serde(skip)]
    pub matcher: Matcher,
}

/// A newer artifact found by a check, to be handed to the update that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingUpdate {
    pub target_version: SemanticVersion,
    pub target_filename: String,
}

/// Step of a binary update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStep {
    /// Re-resolving the installed artifact
    Locate,
    /// Moving the installed artifact into the archive
    Archive,
    /// Copying the new artifact into the install location
    Install,
}

/// How an update attempt ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// Nothing newer in the update source; no files touched
    UpToDate,
    /// New artifact installed, previous one archived
    Updated {
        from: SemanticVersion,
        to: SemanticVersion,
        archived: PathBuf,
        installed: PathBuf,
    },
    /// Stopped before anything needed undoing
    Aborted { step: UpdateStep, reason: String },
    /// Install failed and the archived artifact was moved back
    RolledBack { reason: String, restored: PathBuf },
}

impl UpdateOutcome {
    /// True only when a new artifact was installed
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateOutcome::Updated { .. })
    }

    /// The step that failed, if any
    pub fn failed_step(&self) -> Option<UpdateStep> {
        match self {
            UpdateOutcome::Aborted { step, .. } => Some(*step),
            UpdateOutcome::RolledBack { .. } => Some(UpdateStep::Install),
            UpdateOutcome::UpToDate | UpdateOutcome::Updated { .. } => None,
        }
    }
}
