//! Tool descriptors as stored on disk and their validated registrations

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactTemplate;
use crate::error::HarmonyError;
use crate::version::SemanticVersion;

/// Format of the `last_updated` descriptor field
pub const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Declarative tool record as written in a YAML descriptor file.
///
/// The older field names (`location`, `update_location`, `name_format`,
/// `type`) are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub current_version: String,
    #[serde(alias = "location")]
    pub install_location: PathBuf,
    pub archive_location: PathBuf,
    #[serde(alias = "update_location")]
    pub update_source_location: PathBuf,
    #[serde(alias = "name_format")]
    pub name_template: String,
    #[serde(alias = "type")]
    pub artifact_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Kind of artifact a tool installs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactType {
    /// A single executable file, updated by archive-then-copy
    Binary,
    Other(String),
}

impl From<&str> for ArtifactType {
    fn from(value: &str) -> Self {
        match value {
            "binary" => ArtifactType::Binary,
            other => ArtifactType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactType::Binary => f.write_str("binary"),
            ArtifactType::Other(other) => f.write_str(other),
        }
    }
}

/// One tracked artifact, validated from its descriptor.
///
/// Registrations are read-only once loaded; updates only change the files
/// they point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRegistration {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub current_version_hint: SemanticVersion,
    pub install_location: PathBuf,
    pub archive_location: PathBuf,
    pub update_source_location: PathBuf,
    pub template: ArtifactTemplate,
    pub artifact_type: ArtifactType,
    pub update_frequency: Option<String>,
    pub last_updated: Option<NaiveDateTime>,
}

impl TryFrom<ToolDescriptor> for ToolRegistration {
    type Error = HarmonyError;

    fn try_from(descriptor: ToolDescriptor) -> Result<Self, Self::Error> {
        let template = ArtifactTemplate::new(&descriptor.name_template)?;
        let current_version_hint = SemanticVersion::parse(&descriptor.current_version)?;
        let last_updated = descriptor
            .last_updated
            .as_deref()
            .map(|raw| {
                NaiveDateTime::parse_from_str(raw, LAST_UPDATED_FORMAT).map_err(|e| {
                    HarmonyError::Parse(format!(
                        "tool '{}' has last_updated '{}': {}",
                        descriptor.id, raw, e
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            artifact_type: ArtifactType::from(descriptor.artifact_type.as_str()),
            id: descriptor.id,
            name: descriptor.name,
            description: descriptor.description,
            current_version_hint,
            install_location: descriptor.install_location,
            archive_location: descriptor.archive_location,
            update_source_location: descriptor.update_source_location,
            template,
            update_frequency: descriptor.update_frequency,
            last_updated,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::descriptor;
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[test]
    fn descriptor_reads_current_field_names() {
        let yaml = r#"
id: tool
name: Tool
description: A tool
current_version: v1.0.0
install_location: /opt/tool
archive_location: /opt/archive
update_source_location: /mnt/updates
name_template: "tool_v{major}.{minor}.{patch}"
artifact_type: binary
update_frequency: daily
last_updated: "2024-03-01 12:30"
"#;

        let parsed: ToolDescriptor = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(parsed.install_location, PathBuf::from("/opt/tool"));
        assert_eq!(parsed.update_source_location, PathBuf::from("/mnt/updates"));
        assert_eq!(parsed.update_frequency.as_deref(), Some("daily"));
    }

    #[test]
    fn descriptor_accepts_legacy_field_names() {
        let yaml = r#"
id: tool
name: Tool
current_version: 1.0.0
location: /opt/tool
archive_location: /opt/archive
update_location: /mnt/updates
name_format: "tool_v{major}.{minor}.{patch}"
type: binary
"#;

        let parsed: ToolDescriptor = serde_yaml::from_str(yaml).unwrap();

        let mut expected = descriptor("tool");
        expected.name = "Tool".to_string();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn registration_from_descriptor_validates_fields() {
        let mut raw = descriptor("tool");
        raw.current_version = "V2.1.0".to_string();
        raw.last_updated = Some("2024-03-01 12:30".to_string());

        let registration = ToolRegistration::try_from(raw).unwrap();

        assert_eq!(registration.current_version_hint, SemanticVersion::new(2, 1, 0));
        assert_eq!(registration.artifact_type, ArtifactType::Binary);
        assert_eq!(
            registration.last_updated,
            NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|d| d.and_hms_opt(12, 30, 0))
        );
    }

    #[test]
    fn registration_rejects_template_without_patch() {
        let mut raw = descriptor("tool");
        raw.name_template = "tool_v{major}.{minor}".to_string();

        assert!(matches!(
            ToolRegistration::try_from(raw),
            Err(HarmonyError::Config(_))
        ));
    }

    #[rstest]
    #[case("1.0")]
    #[case("latest")]
    fn registration_rejects_malformed_current_version(#[case] version: &str) {
        let mut raw = descriptor("tool");
        raw.current_version = version.to_string();

        assert!(matches!(
            ToolRegistration::try_from(raw),
            Err(HarmonyError::Parse(_))
        ));
    }

    #[test]
    fn registration_rejects_malformed_last_updated() {
        let mut raw = descriptor("tool");
        raw.last_updated = Some("yesterday".to_string());

        assert!(matches!(
            ToolRegistration::try_from(raw),
            Err(HarmonyError::Parse(_))
        ));
    }

    #[rstest]
    #[case("binary", ArtifactType::Binary)]
    #[case("installer", ArtifactType::Other("installer".to_string()))]
    #[case("Binary", ArtifactType::Other("Binary".to_string()))]
    fn artifact_type_from_descriptor_string(#[case] raw: &str, #[case] expected: ArtifactType) {
        assert_eq!(ArtifactType::from(raw), expected);
        assert_eq!(expected.to_string(), raw);
    }
}
