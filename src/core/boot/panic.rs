//! Panic Handler

use crate::arch::platform::Cpu;
use crate::arch::traits::CpuOps;
use crate::drivers::serial;
use core::panic::PanicInfo;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    Cpu::disable_interrupts();

    serial::emit_str("\n\n=== KERNEL PANIC ===\n");

    if let Some(location) = info.location() {
        serial::emit_str(location.file());
        serial::emit_str("\n");
    }

    serial::emit_str("System halted.\n");

    Cpu::hang();
}
