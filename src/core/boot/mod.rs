//! # Boot — kernel startup
//!
//! Handoff struct, `kernel_main`, and the panic handler.

pub mod entry;
pub mod handoff;
pub mod panic;
