//! Software stand-in for the hardware page directory the VM core treats as
//! an external collaborator: create, destroy, activate, install mapping
//! (v→p, writable), clear mapping, lookup, inspect dirty/accessed bits.
//!
//! A deployed kernel would back this with real x86 page tables and walk
//! them on `cr3` switch; there is no MMU to program here, so `SoftPageDir`
//! keeps the same mapping in a hash table and tracks the dirty bit by
//! hand on every write the VM core performs through it. The VM core never
//! touches hardware page tables directly — it only ever goes through this
//! trait — so swapping in a real implementation later would not change a
//! single line of `mm::vm`.

use crate::klib::hash::hashtable::HashTable;
use crate::mm::addr::{PhysAddr, VirtAddr};

/// The hardware page directory contract the VM core depends on.
pub trait PageDirectory {
    /// Creates a fresh, empty address space.
    fn create() -> Self
    where
        Self: Sized;

    /// Tears down the address space. Does not free frames — the caller
    /// (process exit / SPT `destroy_all`) owns that.
    fn destroy(&mut self);

    /// Makes this the active address space (`cr3` load on real hardware).
    fn activate(&self);

    /// Installs `user_page -> frame`, writable per `writable`. Fails if a
    /// mapping already exists at `user_page`.
    fn set_page(&mut self, user_page: VirtAddr, frame: PhysAddr, writable: bool) -> Result<(), ()>;

    /// Looks up the frame currently installed at `user_page`, if any.
    fn get_page(&self, user_page: VirtAddr) -> Option<PhysAddr>;

    /// Removes the mapping at `user_page`, if any.
    fn clear_page(&mut self, user_page: VirtAddr);

    /// Whether `user_page` has been written since it was installed (or
    /// since the dirty bit was last cleared).
    fn is_dirty(&self, user_page: VirtAddr) -> bool;

    /// Clears the dirty bit for `user_page` without unmapping it.
    fn clear_dirty(&mut self, user_page: VirtAddr);

    /// Records a write to `user_page`, setting its dirty bit. The VM core
    /// calls this itself at materialize time since there is no real MMU
    /// underneath to set it automatically on a store instruction.
    fn mark_dirty(&mut self, user_page: VirtAddr);
}

struct Mapping {
    frame: PhysAddr,
    writable: bool,
    dirty: bool,
}

/// Hash-table backed `PageDirectory`. One instance per process.
pub struct SoftPageDir {
    entries: HashTable<u64, Mapping>,
}

impl SoftPageDir {
    const INITIAL_BUCKETS: usize = 32;
}

impl PageDirectory for SoftPageDir {
    fn create() -> Self {
        Self {
            entries: HashTable::new(Self::INITIAL_BUCKETS),
        }
    }

    fn destroy(&mut self) {
        self.entries = HashTable::new(Self::INITIAL_BUCKETS);
    }

    fn activate(&self) {
        // No real MMU to load a root pointer into; address-space switch
        // happens purely at the Rust level (which Process is "current").
    }

    fn set_page(&mut self, user_page: VirtAddr, frame: PhysAddr, writable: bool) -> Result<(), ()> {
        if self.entries.get(&user_page.as_u64()).is_some() {
            return Err(());
        }
        self.entries.insert(
            user_page.as_u64(),
            Mapping {
                frame,
                writable,
                dirty: false,
            },
        );
        Ok(())
    }

    fn get_page(&self, user_page: VirtAddr) -> Option<PhysAddr> {
        self.entries.get(&user_page.as_u64()).map(|m| m.frame)
    }

    fn clear_page(&mut self, user_page: VirtAddr) {
        self.entries.remove(&user_page.as_u64());
    }

    fn is_dirty(&self, user_page: VirtAddr) -> bool {
        self.entries.get(&user_page.as_u64()).map(|m| m.dirty).unwrap_or(false)
    }

    fn clear_dirty(&mut self, user_page: VirtAddr) {
        if let Some(m) = self.entries.get_mut(&user_page.as_u64()) {
            m.dirty = false;
        }
    }

    fn mark_dirty(&mut self, user_page: VirtAddr) {
        if let Some(m) = self.entries.get_mut(&user_page.as_u64()) {
            m.dirty = true;
        }
    }
}
