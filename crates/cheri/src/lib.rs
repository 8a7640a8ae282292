//! CHERI capability extension for the rvsim RISC-V simulator.
//!
//! This crate models the 128-bit CHERI-RISC-V capability architecture with the following:
//! 1. **Capabilities:** The capability value, its compressed in-memory encoding, and
//!    representability arithmetic.
//! 2. **Tag Memory:** One validity bit per 16-byte granule of physical memory.
//! 3. **Core:** Capability and special capability register files, PCC/SCR coupling with the
//!    scalar program counter and trap CSRs, trap delivery, and the check engine.
//! 4. **ISA:** Decoding, execution and disassembly of the capability instructions.
//! 5. **SoC:** The translator/memory boundary and a flat bare-metal memory.

/// Capability values, permissions and compression.
pub mod cap;
/// Common types and constants (addresses, traps, capability faults, access types).
pub mod common;
/// Extension configuration (memory map, reset state, trace switches).
pub mod config;
/// Hart state, check engine and instruction semantics.
pub mod core;
/// Capability instruction encodings, decoder and disassembler.
pub mod isa;
/// Tag memory, flat memory and the memory port trait.
pub mod soc;

/// The capability register value.
pub use crate::cap::Capability;
/// Root configuration type; use `CheriConfig::default()` or deserialize from JSON.
pub use crate::config::CheriConfig;
/// Hart state and the executor over it.
pub use crate::core::{ExecContext, Hart};
/// Tag memory and the memory port trait.
pub use crate::soc::{FlatMemory, MemoryPort, TagMemory};
