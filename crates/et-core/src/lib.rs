//! et-core: stable foundation for enginetherm.
//!
//! Contains:
//! - numeric (Real + float guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::CoreError;
pub use numeric::*;
