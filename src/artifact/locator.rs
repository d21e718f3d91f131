//! Locating a template-conforming artifact in a directory

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::artifact::fs::FileOps;
use crate::artifact::template::Matcher;
use crate::error::HarmonyError;

static SEMVER_SHAPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").expect("semver pattern is valid"));

/// First `digits.digits.digits` substring of a filename.
///
/// This ignores where the template put its placeholders.
pub fn strip_semver(filename: &str) -> Option<&str> {
    SEMVER_SHAPED.find(filename).map(|m| m.as_str())
}

/// A directory entry that matched a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedArtifact {
    pub filename: String,
    pub version: String,
}

/// Return the first immediate entry of `directory` that matches.
///
/// "First" follows the platform's listing order.
pub fn find_in_directory<F>(
    fs: &F,
    matcher: &Matcher,
    directory: &Path,
) -> Result<LocatedArtifact, HarmonyError>
where
    F: FileOps + ?Sized,
{
    let entries = fs
        .list_dir(directory)
        .map_err(|e| HarmonyError::io(directory, e))?;

    let Some(filename) = entries.into_iter().find(|name| matcher.is_match(name)) else {
        return Err(HarmonyError::NotFound {
            location: directory.to_path_buf(),
            template: matcher.template().to_string(),
        });
    };

    debug!("Matched {} in {:?}", filename, directory);
    let version = version_in_filename(&filename)?.to_string();

    Ok(LocatedArtifact { filename, version })
}

pub(crate) fn version_in_filename(filename: &str) -> Result<&str, HarmonyError> {
    strip_semver(filename).ok_or_else(|| {
        HarmonyError::Parse(format!(
            "'{}' matches its template but has no major.minor.patch substring",
            filename
        ))
    })
}
