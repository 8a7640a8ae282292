//! 128-bit CHERI Concentrate bounds compression.
//!
//! A capability stores its bounds as a 14-bit base mantissa `B`, a 12-bit top
//! mantissa `T` and a 6-bit exponent `E`, relative to the cursor. This module
//! implements:
//! 1. **Encoding:** Choosing `E`, `B` and `T` for requested bounds, rounding
//!    outward when they cannot be represented exactly.
//! 2. **Decoding:** Reconstructing the full 64-bit base and 65-bit top from the
//!    packed fields and the cursor.
//! 3. **Representability:** Whether a cursor can move without changing the
//!    decoded bounds, plus the `CRRL`/`CRAM` alignment helpers.
//!
//! # Packed field layout
//!
//! The low 27 bits of the metadata word (`ebt`) hold the bounds:
//!
//! ```text
//!  26  25          14 13           0
//! +----+-------------+--------------+
//! | IE |  T[11:0]    |   B[13:0]    |
//! +----+-------------+--------------+
//! ```
//!
//! With the internal exponent (`IE = 1`), `T[2:0]` and `B[2:0]` hold `E[5:3]`
//! and `E[2:0]` and the mantissas lose their low three bits.

/// Mantissa width of the base field.
const MW: u32 = 14;

/// Largest meaningful exponent; bounds span the whole address space.
pub const MAX_EXPONENT: u32 = 52;

/// Mask of the 65-bit length/top domain.
const LEN_MASK: u128 = (1 << 65) - 1;

/// One past the highest address: the top of the almighty capability.
pub const ADDR_SPACE_TOP: u128 = 1 << 64;

/// Bit position of the internal-exponent flag in `ebt`.
const IE_SHIFT: u32 = 26;

/// Bit position of the top mantissa in `ebt`.
const T_SHIFT: u32 = 14;

/// Mask of the 12-bit top mantissa field.
const T_FIELD_MASK: u16 = 0xfff;

/// Mask of the 14-bit base mantissa field.
const B_FIELD_MASK: u16 = 0x3fff;

/// Mask of the bounds portion of the metadata word.
pub const EBT_MASK: u64 = (1 << 27) - 1;

/// Bounds encoding of the null and almighty capabilities: `E = 52`, `IE = 1`,
/// spanning `[0, 2^64)`.
pub const RESET_EBT: u64 = 0x401_8004;

/// Unpacked bounds fields with the implied top bits reconstructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsFields {
    /// Exponent, clamped to `MAX_EXPONENT`.
    pub e: u32,
    /// Internal exponent flag.
    pub ie: bool,
    /// 14-bit base mantissa (low three bits zero when `ie`).
    pub b: u16,
    /// 14-bit top mantissa including the two reconstructed top bits.
    pub t: u16,
}

impl BoundsFields {
    /// Unpacks the bounds portion of a metadata word.
    pub fn from_ebt(ebt: u64) -> Self {
        let ie = (ebt >> IE_SHIFT) & 1 != 0;
        let t_field = ((ebt >> T_SHIFT) as u16) & T_FIELD_MASK;
        let b_field = (ebt as u16) & B_FIELD_MASK;

        let (e, b, t_low, len_msbs) = if ie {
            let e = u32::from(((t_field & 7) << 3) | (b_field & 7));
            (e.min(MAX_EXPONENT), b_field & !7, t_field & !7, 1u16)
        } else {
            (0, b_field, t_field, 0u16)
        };

        let carry = u16::from(t_low < (b & T_FIELD_MASK));
        let t_top = ((b >> 12) + len_msbs + carry) & 3;
        Self {
            e,
            ie,
            b,
            t: (t_top << 12) | t_low,
        }
    }

    /// Packs the fields into the bounds portion of a metadata word.
    pub fn to_ebt(self) -> u64 {
        let (t_field, b_field) = if self.ie {
            let e = self.e as u16;
            (
                (self.t & T_FIELD_MASK & !7) | ((e >> 3) & 7),
                (self.b & B_FIELD_MASK & !7) | (e & 7),
            )
        } else {
            (self.t & T_FIELD_MASK, self.b & B_FIELD_MASK)
        };
        (u64::from(self.ie) << IE_SHIFT) | (u64::from(t_field) << T_SHIFT) | u64::from(b_field)
    }

    /// Decodes the full base and top for a capability whose cursor is `cursor`.
    pub fn decode(self, cursor: u64) -> (u64, u128) {
        let e = self.e;
        let a = u128::from(cursor);

        let a3 = ((a >> (e + MW - 3)) & 7) as u8;
        let b3 = ((self.b >> (MW - 3)) & 7) as u8;
        let t3 = ((self.t >> (MW - 3)) & 7) as u8;
        let r3 = b3.wrapping_sub(1) & 7;

        let a_hi = i64::from(a3 < r3);
        let b_hi = i64::from(b3 < r3);
        let t_hi = i64::from(t3 < r3);
        let correction_base = (b_hi - a_hi) as u64;
        let correction_top = (t_hi - a_hi) as u64;

        let a_top = (a >> (e + MW)) as u64;
        let region = |correction: u64, mantissa: u16| -> u128 {
            ((u128::from(a_top.wrapping_add(correction)) << (e + MW))
                | (u128::from(mantissa) << e))
                & LEN_MASK
        };
        let base = region(correction_base, self.b);
        let mut top = region(correction_top, self.t);

        // The top may only lie one region above the base; fold the 65th bit.
        let base2 = (base >> 63) & 1;
        let top2 = (top >> 63) & 3;
        if e < MAX_EXPONENT - 1 && (top2.wrapping_sub(base2) & 3) > 1 {
            top ^= 1 << 64;
        }
        (base as u64, top)
    }

    /// True if decoding at `cursor` yields exactly `[base, top)`.
    #[inline]
    pub fn decodes_to(self, cursor: u64, base: u64, top: u128) -> bool {
        self.decode(cursor) == (base, top)
    }
}

/// Chooses bounds fields for `[base, top)`, rounding outward if needed.
///
/// Returns the fields and whether the encoding is exact. The cursor of the
/// resulting capability is expected to be `base`.
pub fn encode_bounds(base: u64, top: u128) -> (BoundsFields, bool) {
    debug_assert!(
        u128::from(base) <= top && top <= ADDR_SPACE_TOP,
        "bounds [{base:#x}, {top:#x}) are malformed"
    );
    let ext_base = u128::from(base);
    let length = top.wrapping_sub(ext_base) & LEN_MASK;

    // Place the length's leading one at bit 12 of the mantissa window; the
    // bottom 13 bits are covered by the exponent-free format.
    let len_hi = (length >> 13) as u64;
    let clz = if len_hi == 0 {
        MAX_EXPONENT
    } else {
        len_hi.leading_zeros() - (64 - MAX_EXPONENT)
    };
    let e = MAX_EXPONENT - clz;
    let ie = e != 0 || (length >> 12) & 1 != 0;

    if !ie {
        let fields = BoundsFields {
            e: 0,
            ie: false,
            b: (base as u16) & B_FIELD_MASK,
            t: (top as u16) & B_FIELD_MASK,
        };
        return (fields, true);
    }

    let mut b_ie = ((ext_base >> (e + 3)) as u16) & 0x7ff;
    let mut t_ie = ((top >> (e + 3)) as u16) & 0x7ff;

    let mask_lo = (1u128 << (e + 3)) - 1;
    let mut lost_base = ext_base & mask_lo != 0;
    let mut lost_top = top & mask_lo != 0;

    if lost_top {
        t_ie = (t_ie + 1) & 0x7ff;
    }

    let mut e_final = e;
    let len_ie = t_ie.wrapping_sub(b_ie) & 0x7ff;
    if len_ie & 0x400 != 0 {
        // Rounding overflowed the mantissa: retry one exponent up.
        e_final = e + 1;
        lost_base |= b_ie & 1 != 0;
        lost_top |= t_ie & 1 != 0;
        b_ie = ((ext_base >> (e + 4)) as u16) & 0x7ff;
        t_ie = ((((top >> (e + 4)) as u16) & 0x7ff) + u16::from(lost_top)) & 0x7ff;
    }

    let fields = BoundsFields {
        e: e_final,
        ie: true,
        b: b_ie << 3,
        t: t_ie << 3,
    };
    (fields, !(lost_base || lost_top))
}

/// Returns true if bounds `[base, base + length)` encode exactly and decode
/// back to themselves at both `old_cursor` and `new_cursor`.
///
/// Requested bounds that would be rounded outward are never representable.
///
/// Sealed and unsealed capabilities share one format, so `sealed` does not
/// change the answer; it is accepted for callers that track it.
///
/// # Examples
///
/// ```
/// use rvsim_cheri::cap::is_representable;
///
/// // Small objects are byte-precise and tolerate far out-of-bounds cursors.
/// assert!(is_representable(false, 0x1000, 0x100, 0x1000, 0x1000 + 0x800));
/// // Nothing survives a cursor 2^40 bytes away from a 4 KiB object.
/// assert!(!is_representable(false, 0x1000, 0x1000, 0x1000, 1 << 40));
/// // An unaligned megabyte rounds outward, so no cursor is representable.
/// assert!(!is_representable(false, 0x1001, 0x10_0001, 0x1001, 0x1001));
/// ```
pub fn is_representable(
    _sealed: bool,
    base: u64,
    length: u128,
    old_cursor: u64,
    new_cursor: u64,
) -> bool {
    let top = u128::from(base) + length;
    if top > ADDR_SPACE_TOP {
        return false;
    }
    let (fields, exact) = encode_bounds(base, top);
    if !exact {
        return false;
    }
    let fields = BoundsFields::from_ebt(fields.to_ebt());
    fields.decodes_to(old_cursor, base, top) && fields.decodes_to(new_cursor, base, top)
}

/// `CRAM`: the mask an address must be aligned to for a region of `len` bytes
/// to be exactly representable.
///
/// # Examples
///
/// ```
/// use rvsim_cheri::cap::representable_alignment_mask;
///
/// assert_eq!(representable_alignment_mask(0x100), u64::MAX);
/// assert_eq!(representable_alignment_mask(0x10_0000), !0x7ff);
/// ```
pub fn representable_alignment_mask(len: u64) -> u64 {
    let (fields, _) = encode_bounds(0, u128::from(len));
    let shift = if fields.ie {
        fields.e.min(MAX_EXPONENT) + 3
    } else {
        0
    };
    u64::MAX << shift
}

/// `CRRL`: `len` rounded up to the next exactly representable length.
///
/// # Examples
///
/// ```
/// use rvsim_cheri::cap::representable_length;
///
/// assert_eq!(representable_length(0x100), 0x100);
/// assert_eq!(representable_length(0x10_0001), 0x10_0800);
/// ```
pub fn representable_length(len: u64) -> u64 {
    let mask = representable_alignment_mask(len);
    len.wrapping_add(!mask) & mask
}
