//! Generic metadata-store contract and its in-memory implementation.
//!
//! This module provides:
//! - The [`MetaStore`] trait: namespaces, element types, elements
//! - [`Element`] / [`ElementType`], the contract's uniform representations
//! - [`MemoryMetaStore`], a fully mutable in-memory store

mod element;
mod memory;
mod store;

pub use element::{Element, ElementType};
pub use memory::MemoryMetaStore;
pub use store::MetaStore;
