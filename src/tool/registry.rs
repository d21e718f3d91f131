//! In-memory registry of tracked tools, loaded from descriptor files

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::DESCRIPTOR_EXTENSIONS;
use crate::error::HarmonyError;
use crate::tool::types::{LAST_UPDATED_FORMAT, ToolDescriptor, ToolRegistration};
use crate::version::SemanticVersion;

/// Registered tools keyed by id, in registration order
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, ToolRegistration>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every descriptor file directly inside `dir`.
    ///
    /// Files are read in name order. Any malformed descriptor or duplicate
    /// id fails the whole load.
    pub fn load_dir(dir: &Path) -> Result<Self, HarmonyError> {
        if !dir.is_dir() {
            return Err(HarmonyError::Config(format!(
                "config directory must be a directory, got {:?}",
                dir
            )));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| HarmonyError::io(dir, e))?
            .map(|entry| entry.map(|e| e.path()).map_err(|e| HarmonyError::io(dir, e)))
            .collect::<Result<_, _>>()?;
        paths.retain(|path| path.is_file() && is_descriptor(path));
        paths.sort();

        let mut registry = Self::new();
        for path in paths {
            debug!("Loading tool descriptor {:?}", path);
            registry.register(read_descriptor(&path)?)?;
        }

        info!("Loaded {} tool(s) from {:?}", registry.len(), dir);
        Ok(registry)
    }

    /// Validate a descriptor and add it
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
    ) -> Result<&ToolRegistration, HarmonyError> {
        if let Some(existing) = self.tools.get(&descriptor.id) {
            return Err(HarmonyError::Config(format!(
                "tools cannot have duplicate id '{}': '{}' already uses it",
                descriptor.id, existing.name
            )));
        }

        let registration = ToolRegistration::try_from(descriptor)?;
        let entry: &ToolRegistration = self
            .tools
            .entry(registration.id.clone())
            .or_insert(registration);
        Ok(entry)
    }

    pub fn get(&self, id: &str) -> Result<&ToolRegistration, HarmonyError> {
        self.tools
            .get(id)
            .ok_or_else(|| HarmonyError::Config(format!("no tool registered with id '{}'", id)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolRegistration> {
        self.tools.values()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn is_descriptor(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DESCRIPTOR_EXTENSIONS.contains(&ext))
}

pub fn read_descriptor(path: &Path) -> Result<ToolDescriptor, HarmonyError> {
    let content = fs::read_to_string(path).map_err(|e| HarmonyError::io(path, e))?;
    serde_yaml::from_str(&content).map_err(|source| HarmonyError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a descriptor to `<dir>/<id>.yaml`.
///
/// The descriptor is validated first. The written copy carries the
/// canonical current version, an absolute install location, and a
/// `last_updated` stamp of now when none was given.
pub fn save_descriptor(dir: &Path, descriptor: &ToolDescriptor) -> Result<PathBuf, HarmonyError> {
    ToolRegistration::try_from(descriptor.clone())?;

    let mut normalized = descriptor.clone();
    normalized.current_version = SemanticVersion::parse(&descriptor.current_version)?.version();
    normalized.install_location = std::path::absolute(&descriptor.install_location)
        .map_err(|e| HarmonyError::io(&descriptor.install_location, e))?;
    if normalized.last_updated.is_none() {
        normalized.last_updated = Some(Local::now().format(LAST_UPDATED_FORMAT).to_string());
    }

    fs::create_dir_all(dir).map_err(|e| HarmonyError::io(dir, e))?;
    let path = dir.join(format!("{}.yaml", normalized.id));
    let yaml = serde_yaml::to_string(&normalized).map_err(|source| HarmonyError::Yaml {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, yaml).map_err(|e| HarmonyError::io(&path, e))?;

    info!("Saved descriptor for '{}' to {:?}", normalized.id, path);
    Ok(path)
}
