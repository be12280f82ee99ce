//! # File system
//!
//! The loader and the VM core only ever need one file open at a time — the
//! running process's own executable, to read program headers and page in
//! segments on demand. `file::File` is that narrow surface: open, seek,
//! read, length, deny-write. There is no directory tree, no path
//! resolution, no second filesystem backend; a deployed kernel's VFS layer
//! is out of scope here.

pub mod file;

pub use file::{File, FileError};
