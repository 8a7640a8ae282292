//! The capability register value.
//!
//! A `Capability` caches the decoded base and top next to the packed bounds
//! fields it was decoded from, so bounds checks never re-run the decoder and
//! the in-memory form can be reproduced bit for bit.
//!
//! Every cursor mutator checks representability first: a cursor that would
//! change the decoded bounds produces an untagged null capability carrying
//! the requested address instead.

use std::fmt;

use super::compress::{ADDR_SPACE_TOP, BoundsFields, EBT_MASK, RESET_EBT, encode_bounds};
use super::perms::{Permissions, UserPerms};
use crate::common::constants::USER_PERMS_SHIFT;

/// Object type of an unsealed capability.
pub const OTYPE_UNSEALED: u32 = 0x3_ffff;

/// Largest object type that can be used for sealing.
pub const OTYPE_MAX: u32 = 0x3_fffe;

/// XOR mask applied to the metadata word so that the null capability is all
/// zeros in memory.
pub const NULL_XOR_MASK: u64 = 0x0000_1fff_fc01_8004;

/// Metadata word field positions.
mod field {
    pub const UPERMS_SHIFT: u32 = 60;
    pub const PERMS_SHIFT: u32 = 48;
    pub const RESERVED_SHIFT: u32 = 46;
    pub const FLAGS_SHIFT: u32 = 45;
    pub const OTYPE_SHIFT: u32 = 27;
    pub const UPERMS_MASK: u64 = 0xf;
    pub const PERMS_MASK: u64 = 0xfff;
    pub const RESERVED_MASK: u64 = 0x3;
    pub const OTYPE_MASK: u64 = 0x3_ffff;
}

/// A capability as stored in memory: the cursor word and the packed
/// permissions/object-type/bounds word. The tag is held by tag memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CapInMem {
    /// Address word (bytes 0-7).
    pub cursor: u64,
    /// Metadata word (bytes 8-15), XORed with `NULL_XOR_MASK`.
    pub pesbt: u64,
}

/// A capability register value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Capability {
    /// Validity tag.
    pub tag: bool,
    /// Capability-mode flag; on PCC it selects capability-relative `clc`/`csc`.
    pub flags: bool,
    /// Architectural permissions.
    pub perms: Permissions,
    /// Software-defined permissions.
    pub uperms: UserPerms,
    /// Object type, `OTYPE_UNSEALED` when unsealed.
    pub otype: u32,
    /// Reserved metadata bits, preserved through loads and stores.
    pub reserved: u8,
    cursor: u64,
    base: u64,
    top: u128,
    ebt: u64,
}

impl Default for Capability {
    fn default() -> Self {
        Self::null()
    }
}

impl Capability {
    /// The null capability: untagged, no permissions, bounds covering the
    /// address space. Encodes as all zeros in memory.
    pub const fn null() -> Self {
        Self {
            tag: false,
            flags: false,
            perms: Permissions::empty(),
            uperms: UserPerms::empty(),
            otype: OTYPE_UNSEALED,
            reserved: 0,
            cursor: 0,
            base: 0,
            top: ADDR_SPACE_TOP,
            ebt: RESET_EBT,
        }
    }

    /// The almighty capability: tagged, every permission, bounds `[0, 2^64)`.
    pub const fn almighty() -> Self {
        Self {
            tag: true,
            perms: Permissions::all(),
            uperms: UserPerms::all(),
            ..Self::null()
        }
    }

    /// Decodes a capability from its in-memory form and an out-of-band tag.
    pub fn from_mem(mem: CapInMem, tag: bool) -> Self {
        let pesbt = mem.pesbt ^ NULL_XOR_MASK;
        let ebt = pesbt & EBT_MASK;
        let (base, top) = BoundsFields::from_ebt(ebt).decode(mem.cursor);
        Self {
            tag,
            flags: (pesbt >> field::FLAGS_SHIFT) & 1 != 0,
            perms: Permissions::from_bits_truncate(
                ((pesbt >> field::PERMS_SHIFT) & field::PERMS_MASK) as u16,
            ),
            uperms: UserPerms::from_bits_truncate(
                ((pesbt >> field::UPERMS_SHIFT) & field::UPERMS_MASK) as u8,
            ),
            otype: ((pesbt >> field::OTYPE_SHIFT) & field::OTYPE_MASK) as u32,
            reserved: ((pesbt >> field::RESERVED_SHIFT) & field::RESERVED_MASK) as u8,
            cursor: mem.cursor,
            base,
            top,
            ebt,
        }
    }

    /// Encodes the capability into its in-memory form. The tag is dropped.
    pub fn to_mem(&self) -> CapInMem {
        let pesbt = (u64::from(self.uperms.bits()) << field::UPERMS_SHIFT)
            | (u64::from(self.perms.bits()) << field::PERMS_SHIFT)
            | ((u64::from(self.reserved) & field::RESERVED_MASK) << field::RESERVED_SHIFT)
            | (u64::from(self.flags) << field::FLAGS_SHIFT)
            | ((u64::from(self.otype) & field::OTYPE_MASK) << field::OTYPE_SHIFT)
            | self.ebt;
        CapInMem {
            cursor: self.cursor,
            pesbt: pesbt ^ NULL_XOR_MASK,
        }
    }

    /// Lower bound.
    #[inline]
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Upper bound (exclusive); may be `2^64`.
    #[inline]
    pub const fn top(&self) -> u128 {
        self.top
    }

    /// Current address.
    #[inline]
    pub const fn cursor(&self) -> u64 {
        self.cursor
    }

    /// `top - base`; may be `2^64`. Malformed encodings with `top < base`
    /// report zero.
    #[inline]
    pub const fn length(&self) -> u128 {
        self.top.saturating_sub(self.base as u128)
    }

    /// `cursor - base`, wrapping.
    #[inline]
    pub const fn offset(&self) -> u64 {
        self.cursor.wrapping_sub(self.base)
    }

    /// True if the object type is not `OTYPE_UNSEALED`.
    #[inline]
    pub const fn is_sealed(&self) -> bool {
        self.otype != OTYPE_UNSEALED
    }

    /// Packed bounds fields (`IE`, `T`, `B`) as held in the metadata word.
    #[inline]
    pub const fn ebt(&self) -> u64 {
        self.ebt
    }

    /// `(uperms << 15) | perms`, the layout of `cgetperm` and `candperm`.
    #[inline]
    pub fn perm_bits(&self) -> u64 {
        (u64::from(self.uperms.bits()) << USER_PERMS_SHIFT) | u64::from(self.perms.bits())
    }

    /// True if `[addr, addr + len)` lies within `[base, top)`, without overflow.
    pub fn in_bounds(&self, addr: u64, len: u64) -> bool {
        let end = u128::from(addr) + u128::from(len);
        addr >= self.base && end <= self.top
    }

    /// True if moving the cursor to `cursor` keeps the decoded bounds.
    pub fn representable_at(&self, cursor: u64) -> bool {
        if cursor >= self.base && u128::from(cursor) < self.top {
            return true;
        }
        BoundsFields::from_ebt(self.ebt).decodes_to(cursor, self.base, self.top)
    }

    /// Moves the cursor. An unrepresentable cursor yields the untagged null
    /// capability with the requested cursor.
    pub fn set_cursor(&mut self, cursor: u64) {
        if self.representable_at(cursor) {
            self.cursor = cursor;
        } else {
            *self = Self {
                cursor,
                ..Self::null()
            };
        }
    }

    /// Sets the cursor to `base + offset`.
    pub fn set_offset(&mut self, offset: u64) {
        self.set_cursor(self.base.wrapping_add(offset));
    }

    /// Adds `delta` to the cursor.
    pub fn inc_offset(&mut self, delta: u64) {
        self.set_cursor(self.cursor.wrapping_add(delta));
    }

    /// Narrows the bounds to `[base, top)` and moves the cursor to `base`.
    ///
    /// Bounds that cannot be encoded exactly are rounded outward to the next
    /// representable region; the return value reports whether the result is
    /// exact. The tag is preserved: rounding never reaches past bounds that
    /// were themselves produced by the encoder.
    pub fn set_bounds(&mut self, base: u64, top: u128) -> bool {
        debug_assert!(
            base >= self.base && top <= self.top,
            "set_bounds must narrow: [{base:#x}, {top:#x}) outside [{:#x}, {:#x})",
            self.base,
            self.top
        );
        let (fields, exact) = encode_bounds(base, top);
        self.ebt = fields.to_ebt();
        self.cursor = base;
        let (b, t) = BoundsFields::from_ebt(self.ebt).decode(base);
        self.base = b;
        self.top = t;
        exact
    }

    /// Returns the capability with the cursor replaced without a
    /// representability check. Used to compose PCC and the coupled trap
    /// registers from their scalar halves.
    pub(crate) const fn with_cursor_unchecked(self, cursor: u64) -> Self {
        Self { cursor, ..self }
    }

    /// Returns an untagged copy.
    #[inline]
    pub const fn cleared(self) -> Self {
        Self { tag: false, ..self }
    }

    /// Returns a copy sealed with `otype`.
    #[inline]
    pub const fn sealed_with(self, otype: u32) -> Self {
        Self { otype, ..self }
    }

    /// Returns an unsealed copy.
    #[inline]
    pub const fn unsealed(self) -> Self {
        Self {
            otype: OTYPE_UNSEALED,
            ..self
        }
    }
}

impl fmt::Display for Capability {
    /// Formats the capability as the debugger prints it:
    /// `v:<tag> f:<flags> p:<perms> b:<base> l:<length> c:<cursor> t:<otype>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let length = self.length();
        write!(
            f,
            "v:{} f:{} p:{:016x} b:{:016x} l:{:1x}{:016x} c:{:016x} t:{:08x}",
            u8::from(self.tag),
            u8::from(self.flags),
            self.perm_bits(),
            self.base,
            (length >> 64) as u64,
            length as u64,
            self.cursor,
            self.otype
        )
    }
}
