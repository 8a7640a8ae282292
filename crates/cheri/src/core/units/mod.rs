//! Functional units.
//!
//! The capability extension adds a single unit to the datapath: the
//! bounds/permission check engine every capability-relative access and
//! control transfer passes through.

/// Capability bounds, seal and permission check engine.
pub mod cap_check;

pub use cap_check::{Access, AuthReg, CapCheckUnit, check_access};
