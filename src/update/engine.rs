//! Check-then-update state machine for a single tool

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::artifact::locator::version_in_filename;
use crate::artifact::{FileOps, LocalFs, find_in_directory};
use crate::error::HarmonyError;
use crate::tool::{ArtifactType, ToolRegistration};
use crate::update::types::{CurrentArtifact, PendingUpdate, UpdateOutcome, UpdateStep};
use crate::version::SemanticVersion;

/// Runs checks and updates against the filesystem behind `F`.
///
/// One engine may serve many tools, but callers must not run two updates
/// against the same tool's locations at once.
pub struct UpdateEngine<F: FileOps = LocalFs> {
    fs: F,
}

impl UpdateEngine<LocalFs> {
    pub fn new() -> Self {
        Self { fs: LocalFs }
    }
}

impl Default for UpdateEngine<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileOps> UpdateEngine<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Find the installed artifact and its version.
    ///
    /// `NotFound` here means there is no baseline to compare against.
    pub fn locate_current(&self, tool: &ToolRegistration) -> Result<CurrentArtifact, HarmonyError> {
        let matcher = tool.template.matcher();
        let located = find_in_directory(&self.fs, matcher, &tool.install_location)?;
        let version = SemanticVersion::parse(&located.version)?;

        debug!(
            "Current artifact for '{}' is {} ({})",
            tool.id, located.filename, version
        );

        Ok(CurrentArtifact {
            filename: located.filename,
            version,
            matcher: matcher.clone(),
        })
    }

    /// Look for a strictly newer artifact in the tool's update source.
    ///
    /// When several source files carry the same newest version, the one
    /// listed last by the platform wins.
    pub fn check_update(
        &self,
        tool: &ToolRegistration,
    ) -> Result<Option<PendingUpdate>, HarmonyError> {
        let current = self.locate_current(tool)?;

        let source = &tool.update_source_location;
        if !self.fs.is_dir(source) {
            return Err(HarmonyError::Config(format!(
                "update source {:?} of '{}' is not a directory; other source kinds are unsupported",
                source, tool.id
            )));
        }

        let entries = self
            .fs
            .list_dir(source)
            .map_err(|e| HarmonyError::io(source, e))?;

        let mut discovered: HashMap<SemanticVersion, String> = HashMap::new();
        for entry in entries {
            if !current.matcher.is_match(&entry) {
                continue;
            }
            let version = SemanticVersion::parse(version_in_filename(&entry)?)?;
            debug!("Update source offers {} as {}", version, entry);
            if let Some(previous) = discovered.insert(version, entry) {
                debug!("Dropping {} in favour of a later entry with the same version", previous);
            }
        }

        if discovered.is_empty() {
            info!("No candidates for '{}' in {:?}", tool.id, source);
            return Ok(None);
        }

        let latest = current.version.latest_of(discovered.keys());
        if latest == current.version {
            info!("'{}' is up to date at {}", tool.id, current.version);
            return Ok(None);
        }

        let Some(target_filename) = discovered.remove(&latest) else {
            return Ok(None);
        };

        info!(
            "Update available for '{}': {} -> {} ({})",
            tool.id, current.version, latest, target_filename
        );

        Ok(Some(PendingUpdate {
            target_version: latest,
            target_filename,
        }))
    }

    /// Check afresh and, if something newer exists, install it.
    ///
    /// Only `binary` artifacts can be updated. Filesystem failures in the
    /// archive and install steps become an unsuccessful outcome rather than
    /// an error; a failed rollback is returned as
    /// [`HarmonyError::RollbackFailed`].
    pub fn apply_update(&self, tool: &ToolRegistration) -> Result<UpdateOutcome, HarmonyError> {
        let Some(pending) = self.check_update(tool)? else {
            return Ok(UpdateOutcome::UpToDate);
        };

        match &tool.artifact_type {
            ArtifactType::Binary => self.update_binary(tool, &pending),
            other => Err(HarmonyError::Unimplemented(format!(
                "updating '{}' artifacts (tool '{}')",
                other, tool.id
            ))),
        }
    }

    /// Archive the installed binary, then copy the new one in.
    ///
    /// The two steps are not atomic: if the process dies after the archive
    /// move and before the copy completes, the install location is left
    /// without a binary and the previous one sits in the archive. A failed
    /// copy removes whatever it wrote before the original is moved back.
    fn update_binary(
        &self,
        tool: &ToolRegistration,
        pending: &PendingUpdate,
    ) -> Result<UpdateOutcome, HarmonyError> {
        let current = match self.locate_current(tool) {
            Ok(current) => current,
            Err(e) => {
                warn!("Installed artifact of '{}' vanished: {}", tool.id, e);
                return Ok(UpdateOutcome::Aborted {
                    step: UpdateStep::Locate,
                    reason: e.to_string(),
                });
            }
        };

        let original = tool.install_location.join(&current.filename);
        let archived = tool.archive_location.join(&current.filename);

        if let Err(e) = self.archive(&tool.archive_location, &original, &archived) {
            warn!("Archiving {:?} failed: {}", original, e);
            return Ok(UpdateOutcome::Aborted {
                step: UpdateStep::Archive,
                reason: e.to_string(),
            });
        }
        info!("Archived {:?} to {:?}", original, archived);

        let staged = tool.update_source_location.join(&pending.target_filename);
        let installed = tool.install_location.join(&pending.target_filename);

        match self.fs.copy_file(&staged, &installed) {
            Ok(()) => {
                info!(
                    "Updated '{}' from {} to {}",
                    tool.id, current.version, pending.target_version
                );
                Ok(UpdateOutcome::Updated {
                    from: current.version,
                    to: pending.target_version.clone(),
                    archived,
                    installed,
                })
            }
            Err(e) => {
                warn!("Installing {:?} failed, rolling back: {}", staged, e);
                if let Err(cleanup) = self.fs.remove_file(&installed) {
                    warn!("Could not remove partial install {:?}: {}", installed, cleanup);
                }
                self.fs
                    .move_file(&archived, &original)
                    .map_err(|source| HarmonyError::RollbackFailed {
                        archived: archived.clone(),
                        original: original.clone(),
                        source,
                    })?;
                info!("Restored {:?}", original);
                Ok(UpdateOutcome::RolledBack {
                    reason: e.to_string(),
                    restored: original,
                })
            }
        }
    }

    fn archive(&self, archive_dir: &Path, original: &Path, archived: &Path) -> std::io::Result<()> {
        self.fs.create_dir_all(archive_dir)?;
        self.fs.move_file(original, archived)
    }
}
