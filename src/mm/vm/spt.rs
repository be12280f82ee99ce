//! Supplemental page table — one per process.
//!
//! Ports `page_table`/`hash_page_func`/`hash_page_comparator` from
//! `vm/page.c`: a hash table keyed by page number (`user_page >>
//! PAGE_BITS`, same shift the original hash function used) rather than by
//! the raw address, and guarded by its own mutex rather than a lock the
//! caller has to remember to take — `process.c` paired `page_table` with a
//! separate `page_table_lock` by convention; folding the mutex into the
//! type makes that pairing impossible to get wrong.

use crate::klib::hash::HashTable;
use crate::mm::addr::VirtAddr;
use crate::mm::config::{PAGE_BITS, PAGE_SIZE};
use crate::mm::vm::page::Page;
use crate::sync::Mutex;
use alloc::sync::Arc;

fn page_key(addr: VirtAddr) -> u64 {
    addr.align_down(PAGE_SIZE as u64).as_u64() >> PAGE_BITS
}

pub struct Spt {
    entries: Mutex<HashTable<u64, Arc<Page>>>,
}

impl Spt {
    const INITIAL_BUCKETS: usize = 64;

    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashTable::new(Self::INITIAL_BUCKETS)),
        }
    }

    /// `hash_replace` in the original: inserts a fresh entry, silently
    /// replacing whatever was mapped at this page number before. The
    /// loader relies on this to let a later `PT_LOAD` segment overwrite an
    /// earlier placeholder at the same page.
    pub fn insert(&self, page: Arc<Page>) {
        let key = page_key(page.user_addr);
        self.entries.lock().insert(key, page);
    }

    /// `get_page_entry` in the original.
    pub fn lookup(&self, addr: VirtAddr) -> Option<Arc<Page>> {
        let key = page_key(addr);
        self.entries.lock().get(&key).cloned()
    }

    pub fn remove(&self, addr: VirtAddr) -> Option<Arc<Page>> {
        let key = page_key(addr);
        self.entries.lock().remove(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns every page currently tracked, for `destroy_all` during
    /// process exit — the frame table needs each resident page's frame
    /// freed and the swap table needs each swapped-out page's slot freed.
    pub fn drain(&self) -> alloc::vec::Vec<Arc<Page>> {
        let mut entries = self.entries.lock();
        let pages: alloc::vec::Vec<Arc<Page>> = entries.iter().map(|(_, v)| v.clone()).collect();
        *entries = HashTable::new(Self::INITIAL_BUCKETS);
        pages
    }
}

impl Default for Spt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "self_test")]
pub mod self_test {
    use super::*;
    use crate::klib::test_framework::TestResult;
    use crate::mm::vm::page::Page;

    crate::ktest!(insert_then_lookup_round_trips, {
        let spt = Spt::new();
        let page = Page::zero(VirtAddr::new(0x8048_1234), true);
        spt.insert(page.clone());
        let found = spt.lookup(VirtAddr::new(0x8048_1234)).expect("lookup");
        kassert!(found.user_addr == page.user_addr);
    });

    crate::ktest!(lookup_rounds_down_to_page_boundary, {
        let spt = Spt::new();
        spt.insert(Page::zero(VirtAddr::new(0x8048_0000), true));
        kassert!(spt.lookup(VirtAddr::new(0x8048_0FFF)).is_some());
    });

    crate::ktest!(insert_replaces_existing_entry_at_same_page, {
        let spt = Spt::new();
        spt.insert(Page::zero(VirtAddr::new(0x1000), false));
        spt.insert(Page::zero(VirtAddr::new(0x1000), true));
        kassert!(spt.len() == 1);
        kassert!(spt.lookup(VirtAddr::new(0x1000)).unwrap().writable);
    });

    crate::ktest!(remove_drops_the_entry, {
        let spt = Spt::new();
        spt.insert(Page::zero(VirtAddr::new(0x2000), true));
        kassert!(spt.remove(VirtAddr::new(0x2000)).is_some());
        kassert!(spt.lookup(VirtAddr::new(0x2000)).is_none());
    });

    crate::ktest!(drain_empties_the_table_and_returns_everything, {
        let spt = Spt::new();
        spt.insert(Page::zero(VirtAddr::new(0x3000), true));
        spt.insert(Page::zero(VirtAddr::new(0x4000), true));
        let drained = spt.drain();
        kassert!(drained.len() == 2);
        kassert!(spt.is_empty());
    });
}
