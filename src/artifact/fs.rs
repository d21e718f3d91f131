//! Filesystem seam used by the locator and the update engine

use std::fs::{self, FileTimes};
use std::io;
use std::path::Path;

#[cfg(test)]
use mockall::automock;
use tracing::debug;

/// The filesystem operations an update needs.
///
/// Everything is blocking; an update runs to completion or failure on the
/// calling thread.
#[cfg_attr(test, automock)]
pub trait FileOps {
    /// Names of the immediate entries of `dir`, in the order the platform lists them
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;

    fn is_dir(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Move a file, replacing `to` if it exists
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copy a file together with its permissions and timestamps
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a file; a missing file is not an error
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`FileOps`] backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileOps for LocalFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let name = entry?.file_name();
            match name.into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!("Skipping non UTF-8 entry {:?} in {:?}", raw, dir),
            }
        }
        Ok(names)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!("{:?} and {:?} are on different devices, copying", from, to);
                self.copy_file(from, to)?;
                fs::remove_file(from)
            }
            Err(e) => Err(e),
        }
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        let metadata = fs::metadata(from)?;
        let mut source = fs::File::open(from)?;
        let mut target = fs::File::create(to)?;
        io::copy(&mut source, &mut target)?;

        let mut times = FileTimes::new();
        if let Ok(modified) = metadata.modified() {
            times = times.set_modified(modified);
        }
        if let Ok(accessed) = metadata.accessed() {
            times = times.set_accessed(accessed);
        }
        // Times before mode: the copied mode may be read-only
        target.set_times(times)?;
        target.set_permissions(metadata.permissions())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
