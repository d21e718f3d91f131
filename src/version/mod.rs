//! Version model for tracked artifacts
//!
//! Everything above this layer (artifact matching, the update engine, the
//! remote manifest) decides "is this newer?" through [`SemanticVersion`].
//!
//! # Modules
//!
//! - [`semver`]: `major.minor.patch` parsing, comparison, and latest-of folds

pub mod semver;

pub use self::semver::{SemanticVersion, find_latest};
