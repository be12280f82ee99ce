//! Entry point: first Rust code after the assembly trampoline.
//!
//! Brings up just enough of the kernel to exercise the VM core: serial,
//! the kernel heap, the fixed user-frame pool, and a swap device. There is
//! no scheduler and no init process here — the crate's scope is the VM
//! subsystem, not a bootable userspace.

use crate::arch::platform::Cpu;
use crate::arch::traits::CpuOps;
use crate::core::boot::handoff::{BootInfo, BOOT_INFO_VERSION, BOOT_MAGIC};
use crate::drivers::block::mem_disk::MemDisk;
use crate::drivers::serial;
use crate::mm::addr::PhysAddr;
use crate::mm::config::BLOCKS_PER_PAGE;
use crate::mm::vm::swap::SWAP_TABLE;
use alloc::sync::Arc;

/// Swap device size, in slots. Generous relative to the frame pool so
/// eviction tests never hit `SwapFull` by accident.
const SWAP_SLOTS: usize = 64;

/// Kernel entry point, called by `_start` with the stack already set up.
/// Never returns.
pub fn kernel_main(boot_info: &'static BootInfo) -> ! {
    if boot_info.magic != BOOT_MAGIC || boot_info.version != BOOT_INFO_VERSION {
        Cpu::hang();
    }

    serial::init();
    serial::emit_str("(SOPHOS) virtual memory kernel booting\n");

    unsafe {
        crate::mm::heap::init();
    }

    crate::mm::pmm::init(PhysAddr::new(boot_info.pool_base), boot_info.pool_frames);
    crate::kinfo!("(BOOT) user frame pool ready, frames=", boot_info.pool_frames as u64);

    let swap_device = Arc::new(MemDisk::new((SWAP_SLOTS * BLOCKS_PER_PAGE) as u64));
    SWAP_TABLE.init(swap_device);

    #[cfg(feature = "self_test")]
    run_self_tests();

    crate::kinfo!("(BOOT) done, halting");
    Cpu::hang();
}

#[cfg(feature = "self_test")]
fn run_self_tests() {
    use crate::klib::test_framework::{run_test_suite, TestCase};

    crate::klib::test::test::run_klib_tests();
    crate::sys::test::run_sys_tests();
    crate::sync::test::run_sync_tests();

    run_test_suite(
        "fs::file",
        &[
            TestCase::new("reads_advance_cursor", crate::fs::file::self_test::reads_advance_cursor),
            TestCase::new("read_at_does_not_move_cursor", crate::fs::file::self_test::read_at_does_not_move_cursor),
            TestCase::new("short_read_at_eof", crate::fs::file::self_test::short_read_at_eof),
            TestCase::new("deny_write_toggles", crate::fs::file::self_test::deny_write_toggles),
        ],
    );

    crate::mm::vm::test::run_all();

    run_test_suite(
        "process",
        &[
            TestCase::new(
                "wait_returns_the_named_childs_own_status",
                crate::process::self_test::wait_returns_the_named_childs_own_status,
            ),
            TestCase::new(
                "wait_on_unknown_child_returns_none",
                crate::process::self_test::wait_on_unknown_child_returns_none,
            ),
            TestCase::new(
                "exec_returns_child_pid_directly",
                crate::process::self_test::exec_returns_child_pid_directly,
            ),
            TestCase::new(
                "exit_publishes_status_before_children_can_wait_on_it",
                crate::process::self_test::exit_publishes_status_before_children_can_wait_on_it,
            ),
            TestCase::new("exit_clears_the_spt", crate::process::self_test::exit_clears_the_spt),
        ],
    );
}
