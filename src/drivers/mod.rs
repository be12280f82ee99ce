//! # Kernel driver layer
//!
//! Only the two device classes the virtual memory subsystem actually
//! touches remain: `serial` carries the kernel log, `block` carries swap
//! I/O. Graphics, input, PCI enumeration, and timer/PIC drivers have no
//! counterpart here.

pub mod block;
pub mod serial;
