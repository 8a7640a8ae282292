//! # Compressed Bounds Properties
//!
//! Property tests for the 128-bit encoding: memory round trips, cursor
//! representability, and that narrowing never widens.

use proptest::prelude::*;
use rvsim_cheri::cap::{
    CapInMem, Capability, is_representable, representable_alignment_mask, representable_length,
};

/// Derives `[base, base + len)` from almighty without requiring exactness.
fn derive(base: u64, len: u64) -> Capability {
    let mut cap = Capability::almighty();
    cap.set_cursor(base);
    let _ = cap.set_bounds(base, u128::from(base) + u128::from(len));
    cap
}

proptest! {
    #[test]
    fn prop_memory_round_trip(
        base in 0u64..(1 << 48),
        len in 0u64..(1 << 40),
        pick in any::<u64>(),
        tag in any::<bool>(),
    ) {
        let mut cap = derive(base, len);
        let span = (cap.top() - u128::from(cap.base())) as u64;
        if span > 0 {
            cap.set_cursor(cap.base() + pick % span);
        }
        prop_assert!(cap.tag);
        let mut expected = cap;
        expected.tag = tag;
        prop_assert_eq!(Capability::from_mem(cap.to_mem(), tag), expected);
    }

    #[test]
    fn prop_rounding_covers_request(base in 0u64..(1 << 48), len in 0u64..(1 << 40)) {
        let cap = derive(base, len);
        prop_assert!(cap.base() <= base);
        prop_assert!(cap.top() >= u128::from(base) + u128::from(len));
    }

    #[test]
    fn prop_nested_bounds_never_widen(
        base in 0u64..(1 << 48),
        len in 1u64..(1 << 40),
        sub_off in any::<u64>(),
        sub_len in any::<u64>(),
    ) {
        let parent = derive(base, len);
        let span = (parent.top() - u128::from(parent.base())) as u64;
        let off = sub_off % span;
        let child_len = sub_len % (span - off + 1);

        let child_base = parent.base() + off;
        let mut child = parent;
        child.set_cursor(child_base);
        let _ = child.set_bounds(child_base, u128::from(child_base) + u128::from(child_len));
        prop_assert!(child.base() >= parent.base());
        prop_assert!(child.top() <= parent.top());
        prop_assert!(child.tag);
    }

    #[test]
    fn prop_set_cursor_keeps_bounds_or_detags(
        base in 0u64..(1 << 48),
        len in 0u64..(1 << 40),
        cursor in any::<u64>(),
    ) {
        let cap = derive(base, len);
        let mut moved = cap;
        moved.set_cursor(cursor);
        prop_assert_eq!(moved.cursor(), cursor);
        if moved.tag {
            prop_assert_eq!(moved.base(), cap.base());
            prop_assert_eq!(moved.top(), cap.top());
            prop_assert_eq!(moved.perms, cap.perms);
        } else {
            prop_assert!(moved.perms.is_empty());
            prop_assert!(!moved.is_sealed());
        }
    }

    #[test]
    fn prop_small_regions_agree_with_is_representable(
        base in 0u64..(1 << 56),
        len in 0u64..0x1000,
        cursor in any::<u64>(),
    ) {
        let cap = derive(base, len);
        let mut moved = cap;
        moved.set_cursor(cursor);
        prop_assert_eq!(
            moved.tag,
            is_representable(false, base, u128::from(len), base, cursor)
        );
        // Sealing does not change the format.
        prop_assert_eq!(
            is_representable(true, base, u128::from(len), base, cursor),
            is_representable(false, base, u128::from(len), base, cursor)
        );
    }

    #[test]
    fn prop_large_regions_agree_with_is_representable(
        base in 0u64..(1 << 48),
        len in 0x1000u64..(1 << 40),
        shift in 0u32..48,
        delta in any::<i16>(),
    ) {
        // Re-derive the rounded bounds so the request itself is exact.
        let rounded = derive(base, len);
        let mut cap = Capability::almighty();
        cap.set_cursor(rounded.base());
        prop_assume!(cap.set_bounds(rounded.base(), rounded.top()));

        let new = cap.cursor().wrapping_add((i64::from(delta) << shift) as u64);
        let mut moved = cap;
        moved.set_cursor(new);
        prop_assert_eq!(
            moved.tag,
            is_representable(false, cap.base(), cap.length(), cap.cursor(), new)
        );
    }

    #[test]
    fn prop_in_bounds_cursor_is_representable(
        base in 0u64..(1 << 48),
        len in 1u64..(1 << 40),
        pick in any::<u64>(),
    ) {
        let cap = derive(base, len);
        let span = (cap.top() - u128::from(cap.base())) as u64;
        prop_assert!(cap.representable_at(cap.base() + pick % span));
    }

    #[test]
    fn prop_representable_length_is_exact(len in 0u64..(1 << 60)) {
        let rounded = representable_length(len);
        let mask = representable_alignment_mask(len);
        prop_assert!(rounded >= len);
        prop_assert_eq!(rounded & !mask, 0);

        // A region of the rounded length at an aligned base is exact.
        let base = 0x1_0000_0000_0000u64 & mask;
        let mut cap = Capability::almighty();
        cap.set_cursor(base);
        prop_assert!(cap.set_bounds(base, u128::from(base) + u128::from(rounded)));
    }
}

#[test]
fn test_null_round_trips_through_zero() {
    assert_eq!(Capability::null().to_mem(), CapInMem::default());
}

#[test]
fn test_large_region_rounds_outward() {
    let mut cap = Capability::almighty();
    cap.set_cursor(0x1001);
    let exact = cap.set_bounds(0x1001, 0x1001 + 0x10_0001);
    assert!(!exact);
    assert!(cap.base() <= 0x1001);
    assert!(cap.top() >= 0x1001 + 0x10_0001);
    assert_eq!(cap.cursor(), 0x1001);
}

#[test]
fn test_rounded_request_is_not_representable() {
    let cap = derive(0x1001, 0x10_0001);
    assert!(cap.base() < 0x1001);
    assert!(!is_representable(false, 0x1001, 0x10_0001, 0x1001, 0x1001));
    assert!(cap.tag);
}
