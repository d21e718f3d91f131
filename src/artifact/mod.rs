//! Bridge between free-form filenames and structured versions
//!
//! - [`template`]: naming templates with `{major}`/`{minor}`/`{patch}` placeholders
//! - [`locator`]: non-recursive directory scans for template-conforming files
//! - [`fs`]: the filesystem operations the locator and update engine rely on

pub mod fs;
pub mod locator;
pub mod template;

pub use fs::{FileOps, LocalFs};
pub use locator::{LocatedArtifact, find_in_directory, strip_semver};
pub use template::{ArtifactTemplate, Matcher, build_matcher};
