//! # Core — kernel core
//!
//! Hardware-agnostic central infrastructure.
//!
//! | Module    | Responsibility                                |
//! |-----------|------------------------------------------------|
//! | `boot`    | Startup, `kernel_main`, panic handler          |
//! | `logging` | Zero-overhead conditional log macros           |

pub mod boot;
pub mod logging;

pub use boot::entry::kernel_main;
pub use boot::handoff::BootInfo;
