//! Boot handoff structure.
//!
//! A real Pintos-style bootloader hands the kernel a physical memory map;
//! this crate has no bootloader, so `main.rs` constructs a `BootInfo`
//! itself, pointing at a static arena that stands in for the fixed
//! user-frame pool the virtual memory core assumes as a given.

pub const BOOT_MAGIC: u64 = 0x50_4F_4E_54_4F_53; // "PONTOS" truncated to 8 bytes would overflow; this is a plain sentinel.
pub const BOOT_INFO_VERSION: u32 = 1;

/// Handoff payload describing the fixed user-frame pool.
#[repr(C)]
pub struct BootInfo {
    pub magic: u64,
    pub version: u32,
    /// Base physical address of the user-frame pool arena.
    pub pool_base: u64,
    /// Number of `PAGE_SIZE` frames in the pool.
    pub pool_frames: usize,
}
