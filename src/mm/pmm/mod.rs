//! # PMM — the fixed user-frame pool
//!
//! The downward collaborator the VM core draws raw frames from, through
//! exactly three functions: `alloc_user_frame`, `alloc_zeroed_user_frame`,
//! `free_user_frame`. The VM core (`mm::vm`) only ever talks to this
//! through those three functions; eviction policy and pinning live in
//! `mm::vm::frame`, not here.

pub mod bitmap;
pub mod stats;

pub use bitmap::BitmapFrameAllocator;
pub use stats::PmmStats;

use crate::mm::addr::PhysAddr;
use crate::mm::config::PAGE_SIZE;
use crate::sync::Mutex;

pub const FRAME_SIZE: usize = PAGE_SIZE;

pub static FRAME_ALLOCATOR: Mutex<BitmapFrameAllocator> = Mutex::new(BitmapFrameAllocator::empty());

/// Sizes the user-frame pool to `frame_count` frames of scratch memory.
pub fn init(base: PhysAddr, frame_count: usize) {
    FRAME_ALLOCATOR.lock().init(base, frame_count);
}

/// Allocates one raw frame from the pool, uninitialized.
pub fn alloc_user_frame() -> Option<PhysAddr> {
    FRAME_ALLOCATOR.lock().allocate_frame()
}

/// Allocates one frame from the pool, zeroed.
///
/// The frame pool is not identity-mapped in this port (there is no real
/// physical RAM to zero in place); zeroing is the responsibility of
/// whoever materializes content into the frame (see `mm::vm::fault`), so
/// this is currently a thin alias. Kept as its own function because it is
/// a distinct operation from the caller's point of view.
pub fn alloc_zeroed_user_frame() -> Option<PhysAddr> {
    alloc_user_frame()
}

/// Returns a frame to the pool.
pub fn free_user_frame(addr: PhysAddr) {
    FRAME_ALLOCATOR.lock().deallocate_frame(addr)
}
