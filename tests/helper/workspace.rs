//! Temporary install/archive/update-source layout for one tool

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use harmony::artifact::{FileOps, LocalFs};
use harmony::tool::{ToolDescriptor, ToolRegistration};

pub const TEMPLATE: &str = "tool_v{major}.{minor}.{patch}";

pub struct ToolWorkspace {
    root: TempDir,
    pub install: PathBuf,
    pub archive: PathBuf,
    pub source: PathBuf,
}

impl ToolWorkspace {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let install = root.path().join("install");
        let archive = root.path().join("archive");
        let source = root.path().join("updates");
        for dir in [&install, &archive, &source] {
            fs::create_dir(dir).unwrap();
        }
        Self {
            root,
            install,
            archive,
            source,
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Put a file in the install location; its content is its own name
    pub fn with_installed(self, filename: &str) -> Self {
        fs::write(self.install.join(filename), filename).unwrap();
        self
    }

    /// Put a file in the update source; its content is its own name
    pub fn with_source(self, filename: &str) -> Self {
        fs::write(self.source.join(filename), filename).unwrap();
        self
    }

    pub fn descriptor(&self, artifact_type: &str) -> ToolDescriptor {
        ToolDescriptor {
            id: "tool".to_string(),
            name: "Tool".to_string(),
            description: Some("integration test tool".to_string()),
            current_version: "1.0.0".to_string(),
            install_location: self.install.clone(),
            archive_location: self.archive.clone(),
            update_source_location: self.source.clone(),
            name_template: TEMPLATE.to_string(),
            artifact_type: artifact_type.to_string(),
            update_frequency: Some("daily".to_string()),
            last_updated: None,
        }
    }

    pub fn registration(&self) -> ToolRegistration {
        ToolRegistration::try_from(self.descriptor("binary")).unwrap()
    }

    pub fn installed(&self) -> Vec<String> {
        sorted_entries(&self.install)
    }

    pub fn archived(&self) -> Vec<String> {
        sorted_entries(&self.archive)
    }

    pub fn sources(&self) -> Vec<String> {
        sorted_entries(&self.source)
    }
}

fn sorted_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

/// Local filesystem whose copies write part of the target, then fail
pub struct FailingCopyFs;

impl FileOps for FailingCopyFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        LocalFs.list_dir(dir)
    }

    fn is_dir(&self, path: &Path) -> bool {
        LocalFs.is_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        LocalFs.create_dir_all(path)
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        LocalFs.move_file(from, to)
    }

    fn copy_file(&self, _from: &Path, to: &Path) -> io::Result<()> {
        fs::write(to, "trunc")?;
        Err(io::Error::other("simulated install failure"))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        LocalFs.remove_file(path)
    }
}
