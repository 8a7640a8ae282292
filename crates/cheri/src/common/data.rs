//! Memory Access Types.
//!
//! The access kind is what the check engine hands to the external translator.
//! It also selects which access or page fault the translator raises.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Instruction fetch authorized against PCC.
    Fetch,

    /// Data read: scalar loads and capability loads.
    Read,

    /// Data write: scalar stores and capability stores.
    Write,
}
