//! Tracked tools
//! - types.rs: descriptor record and validated registration
//! - registry.rs: loading, registering, and saving descriptors

pub mod registry;
pub mod types;

pub use registry::{ToolRegistry, read_descriptor, save_descriptor};
pub use types::{ArtifactType, ToolDescriptor, ToolRegistration};
