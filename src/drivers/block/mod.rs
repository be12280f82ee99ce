//! # Block devices
//!
//! The swap table's only external collaborator besides the frame pool is
//! a block device to write evicted pages to. `traits::BlockDevice` is the
//! seam; `mem_disk::MemDisk` is the heap-backed implementation this crate
//! actually runs against, standing in for the real disk driver a deployed
//! kernel would have.

pub mod mem_disk;
pub mod traits;

pub use traits::{BlockDevice, BlockDeviceInfo, BlockError};

use alloc::sync::Arc;
use alloc::vec::Vec;
use crate::sync::Mutex;

static BLOCK_DEVICES: Mutex<Vec<Arc<dyn BlockDevice>>> = Mutex::new(Vec::new());

/// Registers a block device, making it discoverable via `get_device`.
pub fn register_device(device: Arc<dyn BlockDevice>) {
    BLOCK_DEVICES.lock().push(device);
}

pub fn get_device(index: usize) -> Option<Arc<dyn BlockDevice>> {
    BLOCK_DEVICES.lock().get(index).cloned()
}

pub fn first_device() -> Option<Arc<dyn BlockDevice>> {
    get_device(0)
}

pub fn device_count() -> usize {
    BLOCK_DEVICES.lock().len()
}
