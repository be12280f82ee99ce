//! # Virtual memory core
//!
//! Supplemental page table, frame table, swap table, page-fault resolver,
//! and the lazy ELF loader that ties them together at process start. Each
//! submodule here ports one file out of the original `vm/` and `userprog/`
//! trees; see the module-level doc comment in each for the exact mapping.

pub mod error;
pub mod fault;
pub mod frame;
pub mod loader;
pub mod page;
pub mod spt;
pub mod swap;

#[cfg(feature = "self_test")]
pub mod test;

pub use error::{VmError, VmResult};
pub use fault::{handle_faulted_page, validate_user_buffer};
pub use frame::{FrameTable, FRAME_TABLE};
pub use loader::{load_executable, tokenize_args, LoadResult};
pub use page::{Page, PageState};
pub use spt::Spt;
pub use swap::{SwapTable, SWAP_TABLE};
