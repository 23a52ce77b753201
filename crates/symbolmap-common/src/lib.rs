//! symbolmap-common — Shared error types used across all symbolmap crates.

pub mod error;

pub use error::{Result, SymbolMapError};
