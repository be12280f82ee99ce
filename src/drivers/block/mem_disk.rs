//! Heap-backed block device — the swap table's backing store.
//!
//! Stands in for the real swap disk a deployed kernel would drive through
//! `ata`/`virtio_blk`. Sized in sectors of `BLOCK_SECTOR_SIZE` bytes, like
//! any other `BlockDevice`.

use super::traits::{BlockDevice, BlockError};
use crate::mm::config::BLOCK_SECTOR_SIZE;
use crate::sync::Mutex;
use alloc::vec;
use alloc::vec::Vec;

pub struct MemDisk {
    sectors: Mutex<Vec<u8>>,
    total_blocks: u64,
}

impl MemDisk {
    /// Allocates `total_blocks` sectors of zeroed backing storage.
    pub fn new(total_blocks: u64) -> Self {
        Self {
            sectors: Mutex::new(vec![0u8; total_blocks as usize * BLOCK_SECTOR_SIZE]),
            total_blocks,
        }
    }

    fn bounds_check(&self, lba: u64, len: usize) -> Result<(), BlockError> {
        if len != BLOCK_SECTOR_SIZE {
            return Err(BlockError::InvalidBuffer);
        }
        if lba >= self.total_blocks {
            return Err(BlockError::InvalidBlock);
        }
        Ok(())
    }
}

impl BlockDevice for MemDisk {
    fn read_block(&self, lba: u64, buf: &mut [u8]) -> Result<(), BlockError> {
        self.bounds_check(lba, buf.len())?;
        let data = self.sectors.lock();
        let start = lba as usize * BLOCK_SECTOR_SIZE;
        buf.copy_from_slice(&data[start..start + BLOCK_SECTOR_SIZE]);
        Ok(())
    }

    fn write_block(&self, lba: u64, buf: &[u8]) -> Result<(), BlockError> {
        self.bounds_check(lba, buf.len())?;
        let mut data = self.sectors.lock();
        let start = lba as usize * BLOCK_SECTOR_SIZE;
        data[start..start + BLOCK_SECTOR_SIZE].copy_from_slice(buf);
        Ok(())
    }

    fn block_size(&self) -> usize {
        BLOCK_SECTOR_SIZE
    }

    fn total_blocks(&self) -> u64 {
        self.total_blocks
    }
}

#[cfg(feature = "self_test")]
pub mod self_test {
    use super::*;
    use crate::klib::test_framework::TestResult;

    crate::ktest!(round_trips_a_sector, {
        let disk = MemDisk::new(16);
        let write_buf = [0xABu8; BLOCK_SECTOR_SIZE];
        kassert!(disk.write_block(3, &write_buf).is_ok());
        let mut read_buf = [0u8; BLOCK_SECTOR_SIZE];
        kassert!(disk.read_block(3, &mut read_buf).is_ok());
        kassert!(write_buf == read_buf);
    });

    crate::ktest!(rejects_out_of_range_lba, {
        let disk = MemDisk::new(4);
        let buf = [0u8; BLOCK_SECTOR_SIZE];
        kassert!(disk.write_block(4, &buf) == Err(BlockError::InvalidBlock));
    });
}
