//! Physical memory for bare-metal runs.
//!
//! This module provides:
//! 1. **FlatMemory:** A `Vec`-backed RAM mapped at a physical base address
//!    with identity translation, for hosts that run without paging.
//! 2. **Tags:** The per-granule tag bitmap (`tags::TagMemory`).

/// Out-of-band capability tag storage.
pub mod tags;

use crate::common::{AccessType, PhysAddr, Trap, VirtAddr};
use crate::config::CheriConfig;
use crate::soc::traits::MemoryPort;

/// Identity-mapped RAM.
///
/// Translation succeeds for any range fully inside `[base, base + size)` and
/// raises the access fault matching the access kind otherwise. Loads outside
/// that range read zero; stores outside it are dropped.
#[derive(Debug, Clone)]
pub struct FlatMemory {
    base: u64,
    data: Vec<u8>,
}

impl FlatMemory {
    /// Creates `size` bytes of zeroed RAM at `base`.
    pub fn new(base: u64, size: usize) -> Self {
        Self {
            base,
            data: vec![0; size],
        }
    }

    /// Creates RAM covering the configured memory range.
    pub fn from_config(config: &CheriConfig) -> Self {
        Self::new(config.memory.ram_base, config.memory.ram_size)
    }

    /// Returns `(base, size)` of the backed range.
    pub fn address_range(&self) -> (u64, u64) {
        (self.base, self.data.len() as u64)
    }

    /// Copies `bytes` into memory at physical address `addr`.
    ///
    /// Bytes falling outside RAM are ignored.
    pub fn write_bytes(&mut self, addr: u64, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            self.write::<1>(PhysAddr(addr.wrapping_add(i as u64)), [*byte]);
        }
    }

    fn index(&self, paddr: PhysAddr, len: u64) -> Option<usize> {
        let off = paddr.val().checked_sub(self.base)?;
        let end = off.checked_add(len)?;
        (end <= self.data.len() as u64).then_some(off as usize)
    }

    fn read<const N: usize>(&self, paddr: PhysAddr) -> [u8; N] {
        let mut out = [0u8; N];
        if let Some(i) = self.index(paddr, N as u64) {
            out.copy_from_slice(&self.data[i..i + N]);
        }
        out
    }

    fn write<const N: usize>(&mut self, paddr: PhysAddr, bytes: [u8; N]) {
        if let Some(i) = self.index(paddr, N as u64) {
            self.data[i..i + N].copy_from_slice(&bytes);
        }
    }
}

impl MemoryPort for FlatMemory {
    fn translate(
        &mut self,
        vaddr: VirtAddr,
        len: u64,
        access: AccessType,
    ) -> Result<PhysAddr, Trap> {
        let paddr = PhysAddr(vaddr.val());
        if self.index(paddr, len).is_some() {
            return Ok(paddr);
        }
        Err(match access {
            AccessType::Fetch => Trap::InstructionAccessFault(vaddr.val()),
            AccessType::Read => Trap::LoadAccessFault(vaddr.val()),
            AccessType::Write => Trap::StoreAccessFault(vaddr.val()),
        })
    }

    fn load_u8(&mut self, paddr: PhysAddr) -> u8 {
        self.read::<1>(paddr)[0]
    }

    fn load_u16(&mut self, paddr: PhysAddr) -> u16 {
        u16::from_le_bytes(self.read(paddr))
    }

    fn load_u32(&mut self, paddr: PhysAddr) -> u32 {
        u32::from_le_bytes(self.read(paddr))
    }

    fn load_u64(&mut self, paddr: PhysAddr) -> u64 {
        u64::from_le_bytes(self.read(paddr))
    }

    fn store_u8(&mut self, paddr: PhysAddr, val: u8) {
        self.write(paddr, [val]);
    }

    fn store_u16(&mut self, paddr: PhysAddr, val: u16) {
        self.write(paddr, val.to_le_bytes());
    }

    fn store_u32(&mut self, paddr: PhysAddr, val: u32) {
        self.write(paddr, val.to_le_bytes());
    }

    fn store_u64(&mut self, paddr: PhysAddr, val: u64) {
        self.write(paddr, val.to_le_bytes());
    }
}
