//! Sophos kernel binary.
//!
//! Sets up the naked-function execution environment, configures the
//! stack, enables SSE (Rust's codegen assumes it), then jumps to
//! `core::boot::entry::kernel_main`.
//!
//! There is no bootloader here to hand the kernel a memory map, so this
//! file plays that role itself: a static byte arena stands in for the
//! fixed user-frame pool, and a static `BootInfo` describing it is built
//! at startup and handed to `kernel_main`.

#![no_std]
#![no_main]
#![feature(naked_functions)]

use sophos::core;
use sophos::core::boot::handoff::{BootInfo, BOOT_INFO_VERSION, BOOT_MAGIC};
use sophos::mm::config::PAGE_SIZE;

// Kernel stack (16 KiB). 16-byte alignment is mandatory for the System V
// ABI on x86_64.
#[repr(align(16))]
struct KernelStack([u8; 16 * 1024]);

#[no_mangle]
static KERNEL_STACK: KernelStack = KernelStack([0; 16 * 1024]);

/// Frames in the user-frame pool this binary hands to `mm::pmm::init`.
const POOL_FRAMES: usize = 256;

#[repr(align(4096))]
struct PoolArena([u8; POOL_FRAMES * PAGE_SIZE]);

static mut POOL_ARENA: PoolArena = PoolArena([0; POOL_FRAMES * PAGE_SIZE]);

static mut BOOT_INFO: BootInfo = BootInfo {
    magic: BOOT_MAGIC,
    version: BOOT_INFO_VERSION,
    pool_base: 0,
    pool_frames: POOL_FRAMES,
};

/// Naked entry point. Sets up `rsp` and enables SSE before calling into
/// Rust.
#[naked]
#[no_mangle]
pub unsafe extern "C" fn _start() -> ! {
    ::core::arch::naked_asm!(
        "lea rsp, [rip + {stack} + {stack_size}]",
        "xor rbp, rbp",

        // CR0: clear EM (bit 2), set MP (bit 1).
        "mov rax, cr0",
        "and ax, 0xFFFB",
        "or ax, 0x2",
        "mov cr0, rax",
        // CR4: set OSFXSR (bit 9) and OSXMMEXCPT (bit 10).
        "mov rax, cr4",
        "or ax, 0x600",
        "mov cr4, rax",

        "call {rust_entry}",

        // rust_entry never returns; trap if it somehow does.
        "cli",
        "hlt",
        "jmp . - 2",

        stack = sym KERNEL_STACK,
        stack_size = const 16 * 1024,
        rust_entry = sym rust_entry,
    );
}

/// Finishes what the naked trampoline can't: builds the `BootInfo` this
/// binary owns and jumps into the library's `kernel_main`.
unsafe extern "C" fn rust_entry() -> ! {
    let arena_base = ::core::ptr::addr_of_mut!(POOL_ARENA) as u64;
    let info_ptr = ::core::ptr::addr_of_mut!(BOOT_INFO);
    (*info_ptr).pool_base = arena_base;

    core::boot::entry::kernel_main(&*info_ptr)
}

/// Required because the library uses `extern crate alloc`.
#[alloc_error_handler]
fn alloc_error_handler(layout: ::core::alloc::Layout) -> ! {
    panic!("kernel OOM: {:?}", layout)
}
