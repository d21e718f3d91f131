use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::HarmonyError;

/// A bare `major.minor.patch` triple.
///
/// Ordering is numeric field by field (major, then minor, then patch), so
/// `1.10.0` sorts after `1.9.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion(Version);

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Parse a version string.
    ///
    /// The input is lower-cased and a single leading `v` is stripped. At least
    /// three dot-separated fields are required; anything after the third field
    /// is ignored, so `"1.2.3.4"` parses as `1.2.3`.
    ///
    /// Examples:
    /// - "1.2.3" -> 1.2.3
    /// - "V2.0.10" -> 2.0.10
    /// - "1.2" -> error
    pub fn parse(text: &str) -> Result<Self, HarmonyError> {
        let lowered = text.to_lowercase();
        let stripped = lowered.strip_prefix('v').unwrap_or(&lowered);

        let fields: Vec<&str> = stripped.split('.').collect();
        if fields.len() < 3 {
            return Err(HarmonyError::Parse(format!(
                "'{}' is not a major.minor.patch version",
                text
            )));
        }

        let major = parse_field(text, fields[0])?;
        let minor = parse_field(text, fields[1])?;
        let patch = parse_field(text, fields[2])?;

        Ok(Self::new(major, minor, patch))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Canonical `major.minor.patch` form
    pub fn version(&self) -> String {
        self.to_string()
    }

    /// Field-wise equality as `(major_equal, minor_equal, patch_equal)`
    pub fn compare(&self, other: &Self) -> (bool, bool, bool) {
        (
            self.major() == other.major(),
            self.minor() == other.minor(),
            self.patch() == other.patch(),
        )
    }

    /// True iff `self` sorts strictly after `other`
    pub fn is_newer(&self, other: &Self) -> bool {
        match self.compare(other) {
            (false, _, _) => self.major() > other.major(),
            (true, false, _) => self.minor() > other.minor(),
            (true, true, false) => self.patch() > other.patch(),
            (true, true, true) => false,
        }
    }

    /// Returns whichever of the two is newer, `other` on a tie
    pub fn newer_of<'a>(&'a self, other: &'a Self) -> &'a Self {
        if self.is_newer(other) { self } else { other }
    }

    /// Fold `others` into `self`, keeping the newest version seen.
    ///
    /// Returns `self` unchanged when `others` is empty.
    pub fn latest_of<'a, I>(&self, others: I) -> SemanticVersion
    where
        I: IntoIterator<Item = &'a SemanticVersion>,
    {
        others
            .into_iter()
            .fold(self, |latest, candidate| latest.newer_of(candidate))
            .clone()
    }
}

fn parse_field(text: &str, field: &str) -> Result<u64, HarmonyError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HarmonyError::Parse(format!(
            "'{}' has a non-numeric version field '{}'",
            text, field
        )));
    }
    field
        .parse::<u64>()
        .map_err(|e| HarmonyError::Parse(format!("'{}': {}", text, e)))
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())
    }
}

impl FromStr for SemanticVersion {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = HarmonyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SemanticVersion> for String {
    fn from(value: SemanticVersion) -> Self {
        value.to_string()
    }
}

/// Find the newest version in a list by value, not by list position.
///
/// Ties keep the first listed spelling. Unparseable entries are an error
/// rather than being skipped.
pub fn find_latest(versions: &[String]) -> Result<Option<String>, HarmonyError> {
    let mut latest: Option<(&String, SemanticVersion)> = None;

    for raw in versions {
        let parsed = SemanticVersion::parse(raw)?;
        latest = match latest {
            Some((kept, kept_version)) if !parsed.is_newer(&kept_version) => {
                Some((kept, kept_version))
            }
            _ => Some((raw, parsed)),
        };
    }

    Ok(latest.map(|(raw, _)| raw.clone()))
}
