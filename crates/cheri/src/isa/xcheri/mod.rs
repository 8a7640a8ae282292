//! Capability Extension (Xcheri).
//!
//! Defines the encodings of the capability instructions and decodes them
//! into `CheriOp`. Most live under the custom-2 opcode; the immediate-offset
//! capability load and store reuse `MISC-MEM` and `STORE`.

/// Instruction decoder.
pub mod decode;

/// Instruction disassembler.
pub mod disasm;

/// Function code 3 definitions.
pub mod funct3;

/// Function code 5 sub-opcodes (single-source ops, loads, stores).
pub mod funct5;

/// Function code 7 definitions.
pub mod funct7;

/// Major opcodes.
pub mod opcodes;

pub use decode::{Addressing, CheriOp, InspectOp, MemWidth, decode};
pub use disasm::disassemble_cheri;
