//! Swap table — ports `vm/swap.c`.
//!
//! One slot holds exactly one page, laid out as `BLOCKS_PER_PAGE`
//! contiguous sectors on the swap block device, same as the original's
//! `bitmap_scan_and_flip(swap_table, 0, BLOCKS_PER_PAGE, 0)`. The bitmap
//! here tracks whole slots rather than individual sectors — equivalent
//! since a slot is always claimed or freed as one unit — which lets it
//! reuse `klib::bitmap::Bitmap` instead of hand-rolling sector arithmetic.

use crate::drivers::block::BlockDevice;
use crate::klib::bitmap::Bitmap;
use crate::mm::config::{BLOCKS_PER_PAGE, BLOCK_SECTOR_SIZE, PAGE_SIZE};
use crate::mm::vm::error::{VmError, VmResult};
use crate::sync::Mutex;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

struct Inner {
    words: Vec<u64>,
    slot_count: usize,
    device: Option<Arc<dyn BlockDevice>>,
}

pub struct SwapTable {
    inner: Mutex<Inner>,
}

impl SwapTable {
    pub const fn empty() -> Self {
        Self {
            inner: Mutex::new(Inner {
                words: Vec::new(),
                slot_count: 0,
                device: None,
            }),
        }
    }

    /// `initialize_swap_table` in the original.
    pub fn init(&self, device: Arc<dyn BlockDevice>) {
        let slot_count = device.total_blocks() as usize / BLOCKS_PER_PAGE;
        let words = slot_count.div_ceil(64);
        let mut inner = self.inner.lock();
        inner.words = vec![0u64; words];
        inner.slot_count = slot_count;
        inner.device = Some(device);
        crate::kinfo!("(VM) swap table initialized, slots=", slot_count as u64);
    }

    /// `load_to_swap` in the original. Writes one page of data to the first
    /// free slot and returns its index. Fixes nothing here — the original's
    /// bug was in the caller (`evict_page` discarding the return value),
    /// not in this function.
    pub fn write_page(&self, page_data: &[u8]) -> VmResult<usize> {
        debug_assert_eq!(page_data.len(), PAGE_SIZE);
        let mut inner = self.inner.lock();
        let slot_count = inner.slot_count;
        let slot = {
            let mut bitmap = Bitmap::new(&mut inner.words, slot_count);
            let slot = bitmap.find_first(false).ok_or(VmError::SwapFull)?;
            bitmap.set(slot, true);
            slot
        };
        let device = inner.device.clone().ok_or(VmError::SwapFull)?;
        let base_lba = (slot * BLOCKS_PER_PAGE) as u64;
        for i in 0..BLOCKS_PER_PAGE {
            let chunk = &page_data[i * BLOCK_SECTOR_SIZE..(i + 1) * BLOCK_SECTOR_SIZE];
            if device.write_block(base_lba + i as u64, chunk).is_err() {
                crate::kwarn!("(VM) swap write failed at slot=", slot as u64);
            }
        }
        Ok(slot)
    }

    /// `load_from_swap` in the original. Reads slot `slot` back into
    /// `page_data` and frees the slot.
    pub fn read_page(&self, slot: usize, page_data: &mut [u8]) {
        debug_assert_eq!(page_data.len(), PAGE_SIZE);
        let mut inner = self.inner.lock();
        let slot_count = inner.slot_count;
        {
            let mut bitmap = Bitmap::new(&mut inner.words, slot_count);
            bitmap.set(slot, false);
        }
        let device = match inner.device.clone() {
            Some(d) => d,
            None => return,
        };
        let base_lba = (slot * BLOCKS_PER_PAGE) as u64;
        for i in 0..BLOCKS_PER_PAGE {
            let chunk = &mut page_data[i * BLOCK_SECTOR_SIZE..(i + 1) * BLOCK_SECTOR_SIZE];
            if device.read_block(base_lba + i as u64, chunk).is_err() {
                crate::kwarn!("(VM) swap read failed at slot=", slot as u64);
            }
        }
    }

    /// Frees a slot without reading it back — used when a process exits
    /// with pages still parked in swap.
    pub fn free_slot(&self, slot: usize) {
        let mut inner = self.inner.lock();
        let slot_count = inner.slot_count;
        let mut bitmap = Bitmap::new(&mut inner.words, slot_count);
        bitmap.set(slot, false);
    }

    pub fn slot_count(&self) -> usize {
        self.inner.lock().slot_count
    }

    pub fn used_slots(&self) -> usize {
        let mut inner = self.inner.lock();
        let slot_count = inner.slot_count;
        let bitmap = Bitmap::new(&mut inner.words, slot_count);
        (0..slot_count).filter(|&i| bitmap.get(i)).count()
    }
}

pub static SWAP_TABLE: SwapTable = SwapTable::empty();

#[cfg(feature = "self_test")]
pub mod self_test {
    use super::*;
    use crate::drivers::block::mem_disk::MemDisk;
    use crate::klib::test_framework::TestResult;

    fn fresh_table(total_blocks: u64) -> SwapTable {
        let table = SwapTable::empty();
        table.init(Arc::new(MemDisk::new(total_blocks)));
        table
    }

    crate::ktest!(round_trips_a_page, {
        let table = fresh_table((BLOCKS_PER_PAGE * 4) as u64);
        let written = [0xABu8; PAGE_SIZE];
        let slot = table.write_page(&written).expect("slot");
        let mut read_back = [0u8; PAGE_SIZE];
        table.read_page(slot, &mut read_back);
        kassert!(written == read_back);
    });

    crate::ktest!(freed_slot_is_reused, {
        let table = fresh_table((BLOCKS_PER_PAGE * 2) as u64);
        let page = [0x11u8; PAGE_SIZE];
        let slot_a = table.write_page(&page).expect("slot a");
        kassert!(table.write_page(&page).is_err());
        table.free_slot(slot_a);
        let slot_b = table.write_page(&page).expect("slot b");
        kassert!(slot_b == slot_a);
    });

    crate::ktest!(swap_full_reports_error, {
        let table = fresh_table(BLOCKS_PER_PAGE as u64);
        let page = [0u8; PAGE_SIZE];
        kassert!(table.write_page(&page).is_ok());
        kassert!(table.write_page(&page) == Err(VmError::SwapFull));
    });
}
