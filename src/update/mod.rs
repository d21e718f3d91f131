//! Update engine
//!
//! ```text
//! IDLE ──check_update──▶ CHECKED ──(none)──▶ up to date
//!                           │
//!                     (PendingUpdate)
//!                           ▼
//!                        ARCHIVE ──fail──▶ aborted
//!                           │
//!                           ▼
//!                        INSTALL ──fail──▶ rollback ──▶ rolled back
//!                           │
//!                           ▼
//!                       COMMITTED
//! ```
//!
//! `apply_update` always starts from a fresh check; the pending update it
//! acts on is a value passed along, never state kept between calls.

pub mod engine;
pub mod types;

pub use engine::UpdateEngine;
pub use types::{CurrentArtifact, PendingUpdate, UpdateOutcome, UpdateStep};
