//! Capability tag memory.
//!
//! One bit per 16-byte granule of physical RAM records whether the granule
//! holds a valid capability. The bitmap is sized from the configured RAM
//! range; granules outside it read as untagged and ignore writes.

use tracing::trace;

use crate::common::PhysAddr;
use crate::common::constants::GRANULE_SHIFT;
use crate::config::CheriConfig;

/// Tag bitmap over a physical address range.
#[derive(Debug, Clone)]
pub struct TagMemory {
    /// Granule index of the first covered granule.
    first: u64,
    /// Number of covered granules.
    count: u64,
    bits: Vec<u64>,
}

impl TagMemory {
    /// Creates tag storage for `size` bytes of RAM at physical `base`, all clear.
    pub fn new(base: u64, size: usize) -> Self {
        let first = base >> GRANULE_SHIFT;
        let count = (size as u64).div_ceil(1 << GRANULE_SHIFT);
        Self {
            first,
            count,
            bits: vec![0; count.div_ceil(64) as usize],
        }
    }

    /// Creates tag storage covering the configured RAM.
    pub fn from_config(config: &CheriConfig) -> Self {
        Self::new(config.memory.ram_base, config.memory.ram_size)
    }

    /// Number of granules covered.
    pub const fn granules(&self) -> u64 {
        self.count
    }

    fn slot(&self, granule: u64) -> Option<(usize, u64)> {
        let rel = granule.checked_sub(self.first)?;
        (rel < self.count).then(|| ((rel / 64) as usize, 1u64 << (rel % 64)))
    }

    /// Returns the tag of granule `granule` (`paddr >> 4`); false outside RAM.
    pub fn get(&self, granule: u64) -> bool {
        self.slot(granule)
            .is_some_and(|(word, mask)| self.bits[word] & mask != 0)
    }

    /// Sets the tag of granule `granule`; ignored outside RAM.
    pub fn set(&mut self, granule: u64, tag: bool) {
        if let Some((word, mask)) = self.slot(granule) {
            if tag {
                self.bits[word] |= mask;
            } else {
                self.bits[word] &= !mask;
            }
        }
    }

    /// Returns the tag of the granule containing `paddr`.
    #[inline]
    pub fn get_paddr(&self, paddr: PhysAddr) -> bool {
        self.get(paddr.granule())
    }

    /// Sets the tag of the granule containing `paddr`.
    #[inline]
    pub fn set_paddr(&mut self, paddr: PhysAddr, tag: bool) {
        trace!(paddr = paddr.val(), tag, "tag write");
        self.set(paddr.granule(), tag);
    }

    /// Clears the tag of every granule overlapping `[paddr, paddr + len)`.
    ///
    /// Called on every scalar store; a store that straddles two granules
    /// invalidates both.
    pub fn clear_range(&mut self, paddr: PhysAddr, len: u64) {
        if len == 0 {
            return;
        }
        let first = paddr.granule();
        let last = paddr.offset(len - 1).granule();
        for granule in first..=last {
            self.set(granule, false);
        }
    }

    /// Clears every tag.
    pub fn reset(&mut self) {
        self.bits.fill(0);
    }
}
