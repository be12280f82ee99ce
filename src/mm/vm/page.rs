//! One supplemental page table entry.
//!
//! Ports `struct page_entry` from `vm/page.c`, but replaces its four
//! separate fields (`location`, `file_ptr`/`file_offset`/`read_bytes`/
//! `zero_bytes`, `swap_slot`) with a single tagged enum — a page cannot
//! simultaneously be file-backed and swapped out, so the Rust type should
//! say so rather than leaving it to convention.

use crate::fs::File;
use crate::mm::addr::{PhysAddr, VirtAddr};
use crate::sync::Mutex;
use alloc::sync::Arc;

/// Where a page's data currently lives.
pub enum PageState {
    /// Never touched; reads as zero. Used for BSS-only segments and newly
    /// grown stack pages before their first fault.
    Zero,
    /// Backed by `file`, to be read at `offset` for `read_bytes` bytes and
    /// zero-filled for the remaining `zero_bytes` of the page.
    InFile {
        file: Arc<File>,
        offset: usize,
        read_bytes: usize,
        zero_bytes: usize,
    },
    /// Written out to swap slot `slot`; no frame currently holds it.
    InSwap { slot: usize },
    /// Resident in `frame`. The frame table holds the reverse mapping back
    /// to this page as a weak reference, so the cycle doesn't keep either
    /// side alive past its owner's lifetime.
    InMemory { frame: PhysAddr },
}

/// A single page of a process's address space, tracked whether or not it is
/// currently resident.
pub struct Page {
    pub user_addr: VirtAddr,
    pub writable: bool,
    /// Held for the duration of any operation that must not be interrupted
    /// by eviction: installing a fresh mapping, reading from swap, reading
    /// from file. This is the finest-grained lock in the system; the frame
    /// table's eviction scan tries it and skips the page if it's already
    /// held rather than blocking.
    pub pin: Mutex<()>,
    pub state: Mutex<PageState>,
}

impl Page {
    pub fn new(user_addr: VirtAddr, writable: bool, state: PageState) -> Arc<Self> {
        Arc::new(Self {
            user_addr,
            writable,
            pin: Mutex::new(()),
            state: Mutex::new(state),
        })
    }

    pub fn zero(user_addr: VirtAddr, writable: bool) -> Arc<Self> {
        Self::new(user_addr, writable, PageState::Zero)
    }
}
