//! Instruction fetch authorization.

use super::Hart;
use crate::common::constants::MIN_INSTRUCTION_BYTES;
use crate::common::{AccessType, PhysAddr, Trap, VirtAddr};
use crate::soc::traits::MemoryPort;

impl Hart {
    /// Authorizes fetching a `len`-byte instruction at architectural address
    /// `addr` through PCC, one 2-byte granule at a time.
    ///
    /// A capability fault is recorded in the cause register before it is
    /// returned.
    ///
    /// # Errors
    ///
    /// The capability fault of the first failing granule.
    pub fn check_ifetch(&mut self, addr: u64, len: u64) -> Result<(), Trap> {
        let pcc = self.pcc();
        let mut granule = addr;
        while granule.wrapping_sub(addr) < len {
            if let Err(fault) = self.check.check_ifetch_granule(&pcc, addr, granule) {
                self.record_fault(fault);
                return Err(fault.into());
            }
            granule = granule.wrapping_add(MIN_INSTRUCTION_BYTES);
        }
        Ok(())
    }

    /// Authorizes and translates a `len`-byte fetch at the program counter.
    ///
    /// # Errors
    ///
    /// A capability fault, or the translator's fetch fault.
    pub fn fetch_paddr(&mut self, port: &mut dyn MemoryPort, len: u64) -> Result<PhysAddr, Trap> {
        let pc = self.arch_pc();
        self.check_ifetch(pc, len)?;
        port.translate(VirtAddr(pc), len, AccessType::Fetch)
    }
}
