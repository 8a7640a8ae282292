//! # Builders

/// Capability instruction encoders.
pub mod instruction;
