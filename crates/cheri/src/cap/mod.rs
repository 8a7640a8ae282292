//! Capability values and their compressed encoding.
//!
//! 1. **Permissions:** Architectural and user permission bitsets.
//! 2. **Compression:** The 128-bit concentrate encoding of bounds, and the
//!    representability arithmetic built on it.
//! 3. **Capability:** The in-register value, its mutators, and conversion to
//!    and from the in-memory form.

/// Architectural and software-defined permission bits.
pub mod perms;

/// 128-bit compressed bounds encoding and representability checks.
pub mod compress;

/// The capability register value.
pub mod capability;

pub use capability::{CapInMem, Capability, OTYPE_MAX, OTYPE_UNSEALED};
pub use compress::{is_representable, representable_alignment_mask, representable_length};
pub use perms::{Permissions, UserPerms};
