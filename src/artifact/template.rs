//! Version-bearing file naming templates

use std::fmt;

use regex::Regex;

use crate::error::HarmonyError;

pub const MAJOR_PLACEHOLDER: &str = "{major}";
pub const MINOR_PLACEHOLDER: &str = "{minor}";
pub const PATCH_PLACEHOLDER: &str = "{patch}";

const PLACEHOLDERS: [&str; 3] = [MAJOR_PLACEHOLDER, MINOR_PLACEHOLDER, PATCH_PLACEHOLDER];

/// Compiled form of a naming template.
///
/// Each placeholder becomes "one or more digits"; every other character is
/// literal. A filename matches when the pattern occurs anywhere in it, so
/// `tool_v{major}.{minor}.{patch}` matches `tool_v1.0.0.exe`.
#[derive(Debug, Clone)]
pub struct Matcher {
    template: String,
    pattern: Regex,
}

impl Matcher {
    pub fn is_match(&self, filename: &str) -> bool {
        self.pattern.is_match(filename)
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
    }
}

impl Eq for Matcher {}

/// Build a matcher, rejecting templates without all three placeholders
pub fn build_matcher(template: &str) -> Result<Matcher, HarmonyError> {
    let missing: Vec<&str> = PLACEHOLDERS
        .iter()
        .copied()
        .filter(|placeholder| !template.contains(placeholder))
        .collect();
    if !missing.is_empty() {
        return Err(HarmonyError::Config(format!(
            "name template '{}' is missing {}",
            template,
            missing.join(", ")
        )));
    }

    let mut pattern = regex::escape(template);
    for placeholder in PLACEHOLDERS {
        pattern = pattern.replace(&regex::escape(placeholder), r"\d+");
    }

    let pattern = Regex::new(&pattern).map_err(|e| {
        HarmonyError::Config(format!("name template '{}' is unusable: {}", template, e))
    })?;

    Ok(Matcher {
        template: template.to_string(),
        pattern,
    })
}

/// A validated naming template for one tool's artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactTemplate {
    matcher: Matcher,
}

impl ArtifactTemplate {
    pub fn new(template: &str) -> Result<Self, HarmonyError> {
        Ok(Self {
            matcher: build_matcher(template)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.matcher.template()
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

impl fmt::Display for ArtifactTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
