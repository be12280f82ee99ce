//! Frame table — ports `vm/frame.c`.
//!
//! Tracks which page currently occupies each frame drawn from the user
//! frame pool, and picks a victim to evict when the pool runs dry. Holds
//! only weak references to the page and to the owning process's page
//! directory: a process's own supplemental page table is the thing that
//! keeps a `Page` alive, and a process's own `Process` struct keeps its
//! `SoftPageDir` alive. If either has already torn down by the time
//! eviction gets around to a frame, the frame is simply reclaimed with
//! nothing left to flush.

use crate::arch::pagedir::{PageDirectory, SoftPageDir};
use crate::mm::addr::PhysAddr;
use crate::mm::config::PAGE_SIZE;
use crate::mm::pmm;
use crate::mm::vm::page::{Page, PageState};
use crate::mm::vm::swap::SWAP_TABLE;
use crate::sync::Mutex;
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;

struct FrameEntry {
    frame: PhysAddr,
    page: Weak<Page>,
    pagedir: Weak<Mutex<SoftPageDir>>,
}

pub struct FrameTable {
    entries: Mutex<Vec<FrameEntry>>,
}

impl FrameTable {
    pub const fn empty() -> Self {
        Self { entries: Mutex::new(Vec::new()) }
    }

    /// `allocate_frame` in the original, with `frame->page = page` folded
    /// into the one call instead of being set by the caller afterwards.
    pub fn allocate_frame(&self, frame: PhysAddr, page: &Arc<Page>, pagedir: &Arc<Mutex<SoftPageDir>>) {
        self.entries.lock().push(FrameEntry {
            frame,
            page: Arc::downgrade(page),
            pagedir: Arc::downgrade(pagedir),
        });
    }

    /// `free_frame` in the original.
    pub fn free_frame(&self, frame: PhysAddr) {
        let mut entries = self.entries.lock();
        if let Some(pos) = entries.iter().position(|e| e.frame == frame) {
            entries.remove(pos);
        }
        drop(entries);
        pmm::free_user_frame(frame);
    }

    pub fn resident_frames(&self) -> usize {
        self.entries.lock().len()
    }

    /// `get_evict_frame` + `evict_page` in the original, corrected: the
    /// original always `return false`s at the end of `evict_page` even on
    /// a successful eviction, so every caller treated eviction as having
    /// failed and the kernel panicked on the very first full pool. This
    /// returns `true` once a frame has actually been freed.
    ///
    /// Picks the first frame whose page is not currently pinned and is
    /// dirty; falls back to the first unpinned frame if none are dirty.
    /// Unlike the original, a frame that is pinned is never chosen even as
    /// a fallback — pinning exists so eviction leaves in-flight I/O alone.
    pub fn evict_page(&self) -> bool {
        let mut entries = self.entries.lock();
        if entries.is_empty() {
            return false;
        }

        let mut dirty_candidate = None;
        let mut any_candidate = None;
        for (i, entry) in entries.iter().enumerate() {
            let Some(page) = entry.page.upgrade() else { continue };
            let Some(pagedir) = entry.pagedir.upgrade() else { continue };
            let Some(guard) = page.pin.try_lock() else { continue };
            drop(guard);

            if any_candidate.is_none() {
                any_candidate = Some(i);
            }
            if pagedir.lock().is_dirty(page.user_addr) {
                dirty_candidate = Some(i);
                break;
            }
        }

        let Some(idx) = dirty_candidate.or(any_candidate) else {
            return false;
        };

        let entry = entries.remove(idx);
        drop(entries);

        let frame = entry.frame;
        if let (Some(page), Some(pagedir)) = (entry.page.upgrade(), entry.pagedir.upgrade()) {
            let _pin = page.pin.lock();
            let bytes = unsafe { frame.as_bytes(PAGE_SIZE) };
            match SWAP_TABLE.write_page(bytes) {
                Ok(slot) => *page.state.lock() = PageState::InSwap { slot },
                Err(_) => crate::kerror!("(VM) evict_page: swap device full, frame content lost"),
            }
            pagedir.lock().clear_page(page.user_addr);
        }
        pmm::free_user_frame(frame);
        true
    }
}

pub static FRAME_TABLE: FrameTable = FrameTable::empty();

/// `get_user_frame` in the original. Allocates a frame from the pool,
/// evicting one resident page and retrying once if the pool is exhausted.
pub fn get_user_frame() -> Option<PhysAddr> {
    if let Some(frame) = pmm::alloc_user_frame() {
        return Some(frame);
    }
    if FRAME_TABLE.evict_page() {
        pmm::alloc_user_frame()
    } else {
        None
    }
}

#[cfg(feature = "self_test")]
pub mod self_test {
    use super::*;
    use crate::drivers::block::mem_disk::MemDisk;
    use crate::klib::test_framework::TestResult;
    use crate::mm::addr::VirtAddr;
    use alloc::sync::Arc;

    fn init_pool(frames: usize) {
        let arena = alloc::vec![0u8; frames * PAGE_SIZE].leak();
        pmm::init(PhysAddr::new(arena.as_ptr() as u64), frames);
        SWAP_TABLE.init(Arc::new(MemDisk::new((frames * 8) as u64)));
    }

    crate::ktest!(allocate_and_free_round_trips, {
        init_pool(4);
        let table = FrameTable::empty();
        let page = Page::zero(VirtAddr::new(0x1000), true);
        let pagedir: Arc<Mutex<SoftPageDir>> = Arc::new(Mutex::new(SoftPageDir::create()));
        let frame = pmm::alloc_user_frame().expect("frame");
        table.allocate_frame(frame, &page, &pagedir);
        kassert!(table.resident_frames() == 1);
        table.free_frame(frame);
        kassert!(table.resident_frames() == 0);
    });

    crate::ktest!(eviction_frees_a_slot_and_marks_swapped, {
        init_pool(1);
        let table = FrameTable::empty();
        let addr = VirtAddr::new(0x2000);
        let page = Page::zero(addr, true);
        let pagedir: Arc<Mutex<SoftPageDir>> = Arc::new(Mutex::new(SoftPageDir::create()));
        let frame = pmm::alloc_user_frame().expect("frame");
        pagedir.lock().set_page(addr, frame, true).expect("map");
        pagedir.lock().mark_dirty(addr);
        table.allocate_frame(frame, &page, &pagedir);

        kassert!(pmm::alloc_user_frame().is_none());
        kassert!(table.evict_page());
        kassert!(table.resident_frames() == 0);
        kassert!(matches!(*page.state.lock(), PageState::InSwap { .. }));
        kassert!(pmm::alloc_user_frame().is_some());
    });

    crate::ktest!(pinned_page_is_not_evicted, {
        init_pool(1);
        let table = FrameTable::empty();
        let addr = VirtAddr::new(0x3000);
        let page = Page::zero(addr, true);
        let pagedir: Arc<Mutex<SoftPageDir>> = Arc::new(Mutex::new(SoftPageDir::create()));
        let frame = pmm::alloc_user_frame().expect("frame");
        table.allocate_frame(frame, &page, &pagedir);

        let _guard = page.pin.lock();
        kassert!(!table.evict_page());
    });
}
