//! Boundary to the external translator and scalar memory.
//!
//! The capability extension never walks page tables or owns RAM. Every access
//! goes through a `MemoryPort` implemented by the host simulator:
//! 1. **Translation:** `translate` may raise page or access faults.
//! 2. **Scalar Access:** Little-endian loads and stores at physical addresses.
//! 3. **Capability Access:** The two 64-bit words of an in-memory capability.
//!    Tags are not part of the port; tag memory is updated separately.

use crate::cap::CapInMem;
use crate::common::{AccessType, PhysAddr, Trap, VirtAddr};

/// Translator plus scalar memory, as seen by the capability instructions.
pub trait MemoryPort {
    /// Translates `len` bytes at `vaddr` for `access`.
    ///
    /// # Errors
    ///
    /// Page faults and access faults for the access kind.
    fn translate(&mut self, vaddr: VirtAddr, len: u64, access: AccessType)
    -> Result<PhysAddr, Trap>;

    /// Loads one byte.
    fn load_u8(&mut self, paddr: PhysAddr) -> u8;
    /// Loads two bytes (little-endian).
    fn load_u16(&mut self, paddr: PhysAddr) -> u16;
    /// Loads four bytes (little-endian).
    fn load_u32(&mut self, paddr: PhysAddr) -> u32;
    /// Loads eight bytes (little-endian).
    fn load_u64(&mut self, paddr: PhysAddr) -> u64;

    /// Stores one byte.
    fn store_u8(&mut self, paddr: PhysAddr, val: u8);
    /// Stores two bytes (little-endian).
    fn store_u16(&mut self, paddr: PhysAddr, val: u16);
    /// Stores four bytes (little-endian).
    fn store_u32(&mut self, paddr: PhysAddr, val: u32);
    /// Stores eight bytes (little-endian).
    fn store_u64(&mut self, paddr: PhysAddr, val: u64);

    /// Loads the cursor word (offset 0) and metadata word (offset 8).
    fn load_capability_inmem(&mut self, paddr: PhysAddr) -> CapInMem {
        CapInMem {
            cursor: self.load_u64(paddr),
            pesbt: self.load_u64(paddr.offset(8)),
        }
    }

    /// Stores the cursor word (offset 0) and metadata word (offset 8).
    fn store_capability_inmem(&mut self, paddr: PhysAddr, cap: CapInMem) {
        self.store_u64(paddr, cap.cursor);
        self.store_u64(paddr.offset(8), cap.pesbt);
    }
}
