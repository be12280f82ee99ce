//! Error type for the virtual memory core.
//!
//! Most of the VM core's external interface returns a plain `bool`, mirroring
//! the collaborator signatures of `handle_faulted_page` and `process_load` —
//! a caller only ever needs to know pass/fail to decide
//! whether to terminate the faulting process. `VmError` exists for the
//! layers underneath that boundary, where the reason matters: the loader's
//! own validation logic, and the frame/swap allocators reporting resource
//! exhaustion up to `fault` before it collapses the result to a `bool`.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    /// The user frame pool is exhausted and eviction could not free one.
    NoFreeFrame,
    /// The swap device has no free slot left to evict a page into.
    SwapFull,
    /// The ELF header failed validation (wrong magic, class, machine, etc).
    BadElf(&'static str),
    /// A `PT_LOAD` program header failed `validate_segment`'s checks.
    BadSegment(&'static str),
    /// A stack-growth request would cross `STACK_LIMIT`.
    StackOverflow,
    /// A file read for a demand-paged segment returned fewer bytes than
    /// `read_bytes` called for.
    ShortRead,
    /// `pagedir_set_page` found a mapping already installed at this address.
    MappingCollision,
    /// The fault could not be classified as file-backed, swapped, or a
    /// legitimate stack-growth access, and must terminate the process.
    UnrecoverableFault,
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmError::NoFreeFrame => write!(f, "no free frame and eviction failed"),
            VmError::SwapFull => write!(f, "swap device exhausted"),
            VmError::BadElf(reason) => write!(f, "invalid ELF header: {}", reason),
            VmError::BadSegment(reason) => write!(f, "invalid program segment: {}", reason),
            VmError::StackOverflow => write!(f, "stack grew past its limit"),
            VmError::ShortRead => write!(f, "short read while paging in a segment"),
            VmError::MappingCollision => write!(f, "page already mapped"),
            VmError::UnrecoverableFault => write!(f, "unrecoverable page fault"),
        }
    }
}

pub type VmResult<T> = Result<T, VmError>;
