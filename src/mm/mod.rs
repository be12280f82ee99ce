//! # Memory Management
//!
//! `pmm` is the downward collaborator the virtual memory core draws frames
//! from; `vm` is the VM core itself — supplemental page table, frame table,
//! swap table, page-fault resolver, and the lazy ELF loader.

pub mod addr;
pub mod config;
pub mod heap;
pub mod ops;
pub mod pmm;
pub mod vm;

pub use addr::{PhysAddr, VirtAddr};
pub use pmm::{BitmapFrameAllocator, PmmStats, FRAME_ALLOCATOR};
