//! # Tag Memory Tests

use rvsim_cheri::common::PhysAddr;
use rvsim_cheri::soc::TagMemory;

const BASE: u64 = 0x8000_0000;

fn tags() -> TagMemory {
    TagMemory::new(BASE, 0x1000)
}

#[test]
fn test_sized_from_ram() {
    assert_eq!(tags().granules(), 0x100);
    assert_eq!(TagMemory::new(BASE, 0x1001).granules(), 0x101);
}

#[test]
fn test_starts_clear() {
    let tags = tags();
    assert!((0..0x100).all(|g| !tags.get((BASE >> 4) + g)));
}

#[test]
fn test_set_and_get_by_address() {
    let mut tags = tags();
    tags.set_paddr(PhysAddr(BASE + 0x20), true);
    assert!(tags.get_paddr(PhysAddr(BASE + 0x20)));
    assert!(tags.get_paddr(PhysAddr(BASE + 0x2f)));
    assert!(!tags.get_paddr(PhysAddr(BASE + 0x30)));
    assert!(!tags.get_paddr(PhysAddr(BASE + 0x1f)));

    tags.set_paddr(PhysAddr(BASE + 0x28), false);
    assert!(!tags.get_paddr(PhysAddr(BASE + 0x20)));
}

#[test]
fn test_outside_ram_reads_clear_and_ignores_writes() {
    let mut tags = tags();
    tags.set_paddr(PhysAddr(BASE - 0x10), true);
    tags.set_paddr(PhysAddr(BASE + 0x1000), true);
    assert!(!tags.get_paddr(PhysAddr(BASE - 0x10)));
    assert!(!tags.get_paddr(PhysAddr(BASE + 0x1000)));
    assert!(!tags.get(u64::MAX));
}

#[test]
fn test_clear_range_straddling_two_granules() {
    let mut tags = tags();
    for off in [0x00, 0x10, 0x20] {
        tags.set_paddr(PhysAddr(BASE + off), true);
    }
    tags.clear_range(PhysAddr(BASE + 0x0c), 8);
    assert!(!tags.get_paddr(PhysAddr(BASE)));
    assert!(!tags.get_paddr(PhysAddr(BASE + 0x10)));
    assert!(tags.get_paddr(PhysAddr(BASE + 0x20)));
}

#[test]
fn test_clear_range_inside_one_granule() {
    let mut tags = tags();
    tags.set_paddr(PhysAddr(BASE), true);
    tags.set_paddr(PhysAddr(BASE + 0x10), true);
    tags.clear_range(PhysAddr(BASE + 0x08), 8);
    assert!(!tags.get_paddr(PhysAddr(BASE)));
    assert!(tags.get_paddr(PhysAddr(BASE + 0x10)));
}

#[test]
fn test_empty_clear_is_noop() {
    let mut tags = tags();
    tags.set_paddr(PhysAddr(BASE), true);
    tags.clear_range(PhysAddr(BASE), 0);
    assert!(tags.get_paddr(PhysAddr(BASE)));
}

#[test]
fn test_reset() {
    let mut tags = tags();
    tags.set_paddr(PhysAddr(BASE + 0xff0), true);
    tags.reset();
    assert!(!tags.get_paddr(PhysAddr(BASE + 0xff0)));
}
