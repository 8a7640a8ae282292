//! Hart state and capability instruction execution.
//!
//! 1. **Arch:** Register files (integer, capability, special capability) and
//!    the scalar CSRs they couple with.
//! 2. **CPU:** The `Hart`, its PCC/SCR coupling, fetch authorization and trap
//!    delivery.
//! 3. **Units:** The bounds/permission check engine.
//! 4. **Exec:** Instruction semantics over an `ExecContext`.

/// Architectural register state.
pub mod arch;

/// Hart state, coupling and trap delivery.
pub mod cpu;

/// Instruction semantics.
pub mod exec;

/// Functional units.
pub mod units;

pub use cpu::Hart;
pub use exec::ExecContext;
