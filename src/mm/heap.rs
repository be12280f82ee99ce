//! # Kernel heap
//!
//! Backs `Box`/`Vec`/`alloc::collections::*` for the rest of the kernel —
//! the supplemental page table, frame table, and swap table are all built
//! on top of these. Previous revisions of this tree hand-rolled a
//! buddy+slab allocator; that design managed arbitrary physical RAM
//! discovered from a bootloader memory map, which this crate no longer
//! has any use for. `linked_list_allocator` covers the same "general
//! purpose heap over a byte arena" role with an off-the-shelf free-list
//! allocator.

use linked_list_allocator::LockedHeap;

#[global_allocator]
static ALLOCATOR: LockedHeap = LockedHeap::empty();

/// Backing storage for the heap. A `static mut` byte array plays the role
/// the old design filled by mapping pages at `HEAP_VIRT_BASE`; there is no
/// virtual memory mapping step here because this kernel has no page
/// tables of its own to install it into.
static mut HEAP_ARENA: [u8; crate::mm::config::HEAP_INITIAL_SIZE] =
    [0u8; crate::mm::config::HEAP_INITIAL_SIZE];

/// Initializes the global allocator. Must run exactly once, before any
/// `alloc::*` type is touched.
///
/// # Safety
/// Caller must guarantee this runs before any allocation and exactly once.
pub unsafe fn init() {
    let start = core::ptr::addr_of_mut!(HEAP_ARENA) as *mut u8;
    ALLOCATOR.lock().init(start, crate::mm::config::HEAP_INITIAL_SIZE);
    crate::kinfo!(
        "(HEAP) kernel heap initialized, size=",
        crate::mm::config::HEAP_INITIAL_SIZE as u64
    );
}

/// Bytes currently free in the heap arena.
pub fn free_bytes() -> usize {
    ALLOCATOR.lock().free()
}

/// Bytes currently allocated out of the heap arena.
pub fn used_bytes() -> usize {
    ALLOCATOR.lock().used()
}
