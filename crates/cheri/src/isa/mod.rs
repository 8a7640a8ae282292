//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the encodings and decoder of the capability instructions.
//!
//! # Extensions
//!
//! * `xcheri`: Capability extension (opcode `0x5b` plus the capability forms
//!   of `LQ`/`SQ`).
//! * `privileged`: Trap cause codes and trap-return encodings.

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Privileged architecture definitions (trap causes, xRET).
pub mod privileged;

/// Capability extension encodings, decoder and disassembler.
pub mod xcheri;
