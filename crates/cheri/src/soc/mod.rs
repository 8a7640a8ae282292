//! Memory-side collaborators of the capability extension.
//!
//! 1. **Traits:** `MemoryPort`, the boundary to the external translator and
//!    scalar memory.
//! 2. **Memory:** `FlatMemory`, a bare-metal identity-mapped RAM, and
//!    `TagMemory`, the out-of-band validity bit per capability granule.

/// Physical memory and tag memory.
pub mod memory;

/// Translator and scalar memory boundary.
pub mod traits;

pub use memory::FlatMemory;
pub use memory::tags::TagMemory;
pub use traits::MemoryPort;
