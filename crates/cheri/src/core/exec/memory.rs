//! Capability-relative and DDC-relative loads and stores.
//!
//! Every access is authorized by the check engine before the translator or
//! memory is touched. Scalar stores clear the tag of each granule they
//! overlap; capability stores write the tag of their granule.

use super::ExecContext;
use crate::cap::{Capability, Permissions};
use crate::common::constants::CAP_SIZE_BYTES;
use crate::common::{PhysAddr, Trap};
use crate::core::units::{Access, AuthReg};
use crate::isa::xcheri::{Addressing, MemWidth};

impl ExecContext<'_> {
    /// Resolves the authorizing capability and the offset from its cursor.
    fn mem_operand(&self, via: Addressing, rs1: usize, imm: i64) -> (Capability, AuthReg, u64) {
        let cap_mode = match via {
            Addressing::Ddc => false,
            Addressing::Cap => true,
            Addressing::ByMode => self.hart.pcc().flags,
        };
        if cap_mode {
            (self.creg(rs1), AuthReg::gpr(rs1), imm as u64)
        } else {
            let offset = self.xreg(rs1).wrapping_add(imm as u64);
            (self.hart.ddc(), AuthReg::DDC, offset)
        }
    }

    fn authorize(
        &mut self,
        auth: &Capability,
        reg: AuthReg,
        offset: u64,
        len: u64,
        access: Access,
    ) -> Result<PhysAddr, Trap> {
        self.hart
            .check
            .authorize(&mut *self.bus, auth, reg, offset, len, access)
    }

    /// Scalar load of `width` into `x[rd]`.
    pub(super) fn exec_load(
        &mut self,
        rd: usize,
        rs1: usize,
        imm: i64,
        width: MemWidth,
        unsigned: bool,
        via: Addressing,
    ) -> Result<(), Trap> {
        let (auth, reg, offset) = self.mem_operand(via, rs1, imm);
        let paddr = self.authorize(&auth, reg, offset, width.bytes(), Access::LOAD)?;
        let val = match (width, unsigned) {
            (MemWidth::Byte, false) => self.bus.load_u8(paddr) as i8 as u64,
            (MemWidth::Byte, true) => u64::from(self.bus.load_u8(paddr)),
            (MemWidth::Half, false) => self.bus.load_u16(paddr) as i16 as u64,
            (MemWidth::Half, true) => u64::from(self.bus.load_u16(paddr)),
            (MemWidth::Word, false) => self.bus.load_u32(paddr) as i32 as u64,
            (MemWidth::Word, true) => u64::from(self.bus.load_u32(paddr)),
            (MemWidth::Double, _) => self.bus.load_u64(paddr),
        };
        self.set_xreg(rd, val);
        Ok(())
    }

    /// Scalar store of the low `width` bytes of `x[rs2]`.
    pub(super) fn exec_store(
        &mut self,
        rs1: usize,
        rs2: usize,
        imm: i64,
        width: MemWidth,
        via: Addressing,
    ) -> Result<(), Trap> {
        let (auth, reg, offset) = self.mem_operand(via, rs1, imm);
        let len = width.bytes();
        let paddr = self.authorize(&auth, reg, offset, len, Access::STORE)?;
        let val = self.xreg(rs2);
        match width {
            MemWidth::Byte => self.bus.store_u8(paddr, val as u8),
            MemWidth::Half => self.bus.store_u16(paddr, val as u16),
            MemWidth::Word => self.bus.store_u32(paddr, val as u32),
            MemWidth::Double => self.bus.store_u64(paddr, val),
        }
        self.tags.clear_range(paddr, len);
        Ok(())
    }

    /// Capability load into `c[cd]`. The loaded tag is the granule's tag,
    /// kept only if the authority may load capabilities.
    pub(super) fn exec_load_cap(
        &mut self,
        cd: usize,
        rs1: usize,
        imm: i64,
        via: Addressing,
    ) -> Result<(), Trap> {
        let (auth, reg, offset) = self.mem_operand(via, rs1, imm);
        let access = Access::LOAD | Access::CAP;
        let vaddr = self.hart.check.check(&auth, reg, offset, CAP_SIZE_BYTES, access)?;
        if vaddr.val() % CAP_SIZE_BYTES != 0 {
            return Err(Trap::LoadAddressMisaligned(vaddr.val()));
        }
        let paddr = self.bus.translate(vaddr, CAP_SIZE_BYTES, access.access_type())?;
        let mem = self.bus.load_capability_inmem(paddr);
        let tag = auth.perms.contains(Permissions::LOAD_CAP) && self.tags.get_paddr(paddr);
        self.set_creg(cd, Capability::from_mem(mem, tag));
        Ok(())
    }

    /// Capability store of `c[cs2]`. Storing a local (non-global) tagged
    /// capability needs the store-local permission.
    pub(super) fn exec_store_cap(
        &mut self,
        rs1: usize,
        cs2: usize,
        imm: i64,
        via: Addressing,
    ) -> Result<(), Trap> {
        let (auth, reg, offset) = self.mem_operand(via, rs1, imm);
        let val = self.creg(cs2);
        let mut access = Access::STORE | Access::CAP;
        if val.tag && !val.perms.contains(Permissions::GLOBAL) {
            access |= Access::STORE_LOCAL;
        }
        let vaddr = self.hart.check.check(&auth, reg, offset, CAP_SIZE_BYTES, access)?;
        if vaddr.val() % CAP_SIZE_BYTES != 0 {
            return Err(Trap::StoreAddressMisaligned(vaddr.val()));
        }
        let paddr = self.bus.translate(vaddr, CAP_SIZE_BYTES, access.access_type())?;
        self.bus.store_capability_inmem(paddr, val.to_mem());
        self.tags.set_paddr(paddr, val.tag);
        Ok(())
    }
}
