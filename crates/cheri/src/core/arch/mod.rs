//! Architectural register definitions.
//!
//! * `gpr`: integer registers.
//! * `cap_regs`: the 32 general capability registers.
//! * `scr`: special capability register indices, access table and storage.
//! * `csr`: the scalar trap CSRs coupled with the trap SCRs.
//! * `mode`: privilege levels.

/// General capability register file.
pub mod cap_regs;

/// Control and status registers used by trap delivery.
pub mod csr;

/// General-purpose integer register file.
pub mod gpr;

/// Privilege mode definitions.
pub mod mode;

/// Special capability registers.
pub mod scr;
