//! Shared-object ownership and persistence.
//!
//! This module provides:
//! - Atomic JSON file operations
//! - The [`SharedObjectRegistry`], sole owner of the typed shared objects

mod atomic;
mod shared;

pub use atomic::{atomic_read_json, atomic_write_json};
pub use shared::{ObjectKind, SharedObject, SharedObjectRegistry};
