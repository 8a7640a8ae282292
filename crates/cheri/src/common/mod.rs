//! Common types shared across the capability extension.
//!
//! This module provides the building blocks every other layer depends on:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Constants:** Capability width, tag granule geometry, and exception codes.
//! 3. **Memory Access:** The access kind handed to the external translator.
//! 4. **Error Handling:** The `Trap` value, capability cause codes, and fault-cause encoding.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Capability and granule geometry constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Trap values and capability fault causes.
pub mod error;

pub use addr::{PhysAddr, VirtAddr};
pub use constants::{CAP_SIZE_BYTES, GRANULE_SHIFT};
pub use data::AccessType;
pub use error::{CapCause, CapFault, Trap};
