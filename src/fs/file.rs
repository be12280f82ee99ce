//! In-memory file handle.
//!
//! Stands in for the real filesystem a deployed kernel would open the
//! running executable through. Bytes are supplied directly by whoever
//! calls `File::open` — there is no directory lookup here, because the
//! loader only ever has one file open: the ELF binary it was asked to run.

use crate::sync::Mutex;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileError {
    NotFound,
    OutOfBounds,
}

pub struct File {
    data: Arc<Vec<u8>>,
    pos: Mutex<usize>,
    deny_write: Mutex<bool>,
}

impl File {
    /// `filesys_open()` in the original. `data` is the full file content.
    pub fn open(data: Arc<Vec<u8>>) -> Self {
        Self {
            data,
            pos: Mutex::new(0),
            deny_write: Mutex::new(false),
        }
    }

    /// `file_length()` in the original.
    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// `file_seek()` in the original.
    pub fn seek(&self, offset: usize) {
        *self.pos.lock() = offset;
    }

    pub fn tell(&self) -> usize {
        *self.pos.lock()
    }

    /// `file_read()` in the original. Reads up to `buf.len()` bytes starting at
    /// the current position and advances it. Returns the number of bytes
    /// actually read, short at end-of-file.
    pub fn read(&self, buf: &mut [u8]) -> usize {
        let mut pos = self.pos.lock();
        let n = self.read_at(*pos, buf);
        *pos += n;
        n
    }

    /// Reads without disturbing the file's own cursor. The loader uses this
    /// to read program headers out of order while a lazy segment fault
    /// later reads page contents through the cursor-based `read`.
    pub fn read_at(&self, offset: usize, buf: &mut [u8]) -> usize {
        if offset >= self.data.len() {
            return 0;
        }
        let end = (offset + buf.len()).min(self.data.len());
        let n = end - offset;
        buf[..n].copy_from_slice(&self.data[offset..end]);
        n
    }

    /// `file_deny_write()` in the original. Called once a process starts
    /// running its own executable, so nothing else can modify it underfoot.
    pub fn deny_write(&self) {
        *self.deny_write.lock() = true;
    }

    pub fn allow_write(&self) {
        *self.deny_write.lock() = false;
    }

    pub fn write_denied(&self) -> bool {
        *self.deny_write.lock()
    }

    /// `file_close()` in the original. Restores write access; there is no
    /// other resource here to release.
    pub fn close(&self) {
        self.allow_write();
    }
}

#[cfg(feature = "self_test")]
pub mod self_test {
    use super::*;
    use crate::klib::test_framework::TestResult;
    use alloc::vec;

    crate::ktest!(reads_advance_cursor, {
        let file = File::open(Arc::new(vec![1, 2, 3, 4, 5]));
        let mut buf = [0u8; 2];
        kassert!(file.read(&mut buf) == 2);
        kassert!(buf == [1, 2]);
        kassert!(file.read(&mut buf) == 2);
        kassert!(buf == [3, 4]);
        kassert!(file.tell() == 4);
    });

    crate::ktest!(read_at_does_not_move_cursor, {
        let file = File::open(Arc::new(vec![10, 20, 30, 40]));
        file.seek(1);
        let mut buf = [0u8; 2];
        kassert!(file.read_at(2, &mut buf) == 2);
        kassert!(buf == [30, 40]);
        kassert!(file.tell() == 1);
    });

    crate::ktest!(short_read_at_eof, {
        let file = File::open(Arc::new(vec![1, 2, 3]));
        file.seek(2);
        let mut buf = [0u8; 4];
        kassert!(file.read(&mut buf) == 1);
    });

    crate::ktest!(deny_write_toggles, {
        let file = File::open(Arc::new(vec![0u8; 1]));
        kassert!(!file.write_denied());
        file.deny_write();
        kassert!(file.write_denied());
        file.close();
        kassert!(!file.write_denied());
    });
}
