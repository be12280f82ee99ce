//! Bitmap allocator over the fixed user-frame pool.
//!
//! The frame allocator (`alloc_user_frame`, `alloc_zeroed_user_frame`,
//! `free_user_frame`) draws from a fixed user page pool — it is not itself
//! part of the VM core. This keeps the original bitmap-allocator design
//! (one bit per frame, linear scan for the first clear bit) but drops the
//! boot-time memory-map discovery the original used: there is no
//! bootloader here, so the pool is a single contiguous arena handed in at
//! `init` time.

use crate::mm::addr::PhysAddr;
use crate::mm::config::PAGE_SIZE;
use crate::mm::pmm::stats::PmmStats;
use alloc::vec;
use alloc::vec::Vec;

pub struct BitmapFrameAllocator {
    base: PhysAddr,
    bitmap: Vec<u64>,
    total_frames: usize,
    stats: PmmStats,
}

impl BitmapFrameAllocator {
    pub const fn empty() -> Self {
        Self {
            base: PhysAddr::new(0),
            bitmap: Vec::new(),
            total_frames: 0,
            stats: PmmStats::new(),
        }
    }

    /// Initializes the pool to cover `frame_count` frames starting at
    /// `base`. All frames start free.
    pub fn init(&mut self, base: PhysAddr, frame_count: usize) {
        let words = (frame_count + 63) / 64;
        self.base = base;
        self.bitmap = vec![0u64; words];
        self.total_frames = frame_count;
        crate::kinfo!("(PMM) user frame pool initialized, frames=", frame_count as u64);
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn used_frames(&self) -> usize {
        self.stats.used_frames.load(core::sync::atomic::Ordering::Relaxed)
    }

    fn frame_addr(&self, index: usize) -> PhysAddr {
        self.base.add((index * PAGE_SIZE) as u64)
    }

    fn index_of(&self, addr: PhysAddr) -> Option<usize> {
        let offset = addr.as_u64().checked_sub(self.base.as_u64())?;
        if !addr.is_aligned(PAGE_SIZE as u64) {
            return None;
        }
        let idx = (offset / PAGE_SIZE as u64) as usize;
        if idx < self.total_frames {
            Some(idx)
        } else {
            None
        }
    }

    /// Finds and claims the first free frame. `None` means the pool is
    /// exhausted — the caller (frame table's `get_user_frame`) is
    /// responsible for triggering eviction before giving up.
    pub fn allocate_frame(&mut self) -> Option<PhysAddr> {
        for (word_idx, word) in self.bitmap.iter_mut().enumerate() {
            if *word != u64::MAX {
                let bit = (!*word).trailing_zeros() as usize;
                let frame_idx = word_idx * 64 + bit;
                if frame_idx >= self.total_frames {
                    continue;
                }
                *word |= 1 << bit;
                self.stats.inc_alloc();
                return Some(self.frame_addr(frame_idx));
            }
        }
        None
    }

    pub fn deallocate_frame(&mut self, addr: PhysAddr) {
        let Some(idx) = self.index_of(addr) else {
            crate::kwarn!("(PMM) deallocate_frame: out-of-range address=", addr.as_u64());
            return;
        };
        let word = idx / 64;
        let bit = idx % 64;
        if self.bitmap[word] & (1 << bit) == 0 {
            crate::kwarn!("(PMM) double free at frame=", idx as u64);
            return;
        }
        self.bitmap[word] &= !(1 << bit);
        self.stats.inc_free();
    }
}

unsafe impl Send for BitmapFrameAllocator {}
unsafe impl Sync for BitmapFrameAllocator {}
