//! Control and Status Registers used by trap delivery.
//!
//! This module keeps only the CSRs the capability extension interacts with:
//! 1. **Address Definitions:** Machine and supervisor trap CSRs.
//! 2. **Field Masks:** `mstatus` interrupt-enable and previous-privilege bits.
//! 3. **Register Storage:** The `Csrs` struct. `mtvec`, `mepc`, `stvec` and
//!    `sepc` hold the offset half of the coupled trap SCRs.

/// Supervisor status register CSR address (a view of `mstatus`).
pub const SSTATUS: u32 = 0x100;

/// Supervisor trap vector base address register CSR address.
pub const STVEC: u32 = 0x105;

/// Supervisor scratch register CSR address.
pub const SSCRATCH: u32 = 0x140;

/// Supervisor exception program counter CSR address.
pub const SEPC: u32 = 0x141;

/// Supervisor cause register CSR address.
pub const SCAUSE: u32 = 0x142;

/// Supervisor trap value register CSR address.
pub const STVAL: u32 = 0x143;

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;

/// Machine exception delegation register CSR address.
pub const MEDELEG: u32 = 0x302;

/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;

/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;

/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;

/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Machine trap value register CSR address.
pub const MTVAL: u32 = 0x343;

/// Supervisor interrupt enable bit in `mstatus`.
pub const MSTATUS_SIE: u64 = 1 << 1;

/// Machine interrupt enable bit in `mstatus`.
pub const MSTATUS_MIE: u64 = 1 << 3;

/// Supervisor previous interrupt enable bit in `mstatus`.
pub const MSTATUS_SPIE: u64 = 1 << 5;

/// Machine previous interrupt enable bit in `mstatus`.
pub const MSTATUS_MPIE: u64 = 1 << 7;

/// Supervisor previous privilege bit in `mstatus`.
pub const MSTATUS_SPP: u64 = 1 << 8;

/// Machine previous privilege field in `mstatus`.
pub const MSTATUS_MPP: u64 = 3 << 11;

/// Bit shift of the machine previous privilege field.
pub const MSTATUS_MPP_SHIFT: u64 = 11;

/// Bits of `mstatus` visible through `sstatus`.
pub const SSTATUS_MASK: u64 = MSTATUS_SIE | MSTATUS_SPIE | MSTATUS_SPP;

/// Trap vector mode bits; the handler address is `xtvec & !TVEC_MODE_MASK`.
pub const TVEC_MODE_MASK: u64 = 3;

/// Trap CSR file.
#[derive(Debug, Clone, Default)]
pub struct Csrs {
    /// Machine status register.
    pub mstatus: u64,
    /// Machine exception delegation.
    pub medeleg: u64,
    /// Machine trap vector (offset half of MTCC).
    pub mtvec: u64,
    /// Machine scratch register.
    pub mscratch: u64,
    /// Machine exception program counter (offset half of MEPCC).
    pub mepc: u64,
    /// Machine trap cause.
    pub mcause: u64,
    /// Machine trap value.
    pub mtval: u64,
    /// Supervisor trap vector (offset half of STCC).
    pub stvec: u64,
    /// Supervisor scratch register.
    pub sscratch: u64,
    /// Supervisor exception program counter (offset half of SEPCC).
    pub sepc: u64,
    /// Supervisor trap cause.
    pub scause: u64,
    /// Supervisor trap value.
    pub stval: u64,
}

impl Csrs {
    /// Reads a CSR by address; unknown addresses read as 0.
    pub const fn read(&self, addr: u32) -> u64 {
        match addr {
            SSTATUS => self.mstatus & SSTATUS_MASK,
            STVEC => self.stvec,
            SSCRATCH => self.sscratch,
            SEPC => self.sepc,
            SCAUSE => self.scause,
            STVAL => self.stval,
            MSTATUS => self.mstatus,
            MEDELEG => self.medeleg,
            MTVEC => self.mtvec,
            MSCRATCH => self.mscratch,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            MTVAL => self.mtval,
            _ => 0,
        }
    }

    /// Writes a CSR by address; unknown addresses are ignored.
    ///
    /// Writing `mtvec`/`stvec`/`mepc`/`sepc` here moves the cursor of the
    /// coupled SCR, since the SCR reads its cursor from the CSR.
    pub const fn write(&mut self, addr: u32, val: u64) {
        match addr {
            SSTATUS => self.mstatus = (self.mstatus & !SSTATUS_MASK) | (val & SSTATUS_MASK),
            STVEC => self.stvec = val,
            SSCRATCH => self.sscratch = val,
            SEPC => self.sepc = val,
            SCAUSE => self.scause = val,
            STVAL => self.stval = val,
            MSTATUS => self.mstatus = val,
            MEDELEG => self.medeleg = val,
            MTVEC => self.mtvec = val,
            MSCRATCH => self.mscratch = val,
            MEPC => self.mepc = val,
            MCAUSE => self.mcause = val,
            MTVAL => self.mtval = val,
            _ => {}
        }
    }
}
