//! # Hardware Abstraction Layer (HAL)
//!
//! `arch` is the bridge between the architecture-agnostic kernel core and
//! the real CPU. The VM subsystem itself never depends on it directly for
//! page-table management — see `arch::pagedir` — but still needs a place to
//! halt, mask interrupts, and park the CPU on panic.
//!
//! ## Responsibility
//! - Isolation: the rest of the kernel (`core`, `mm`) does not know which CPU
//!   it runs on.
//! - Abstraction: traits in `traits/` that a concrete backend must satisfy.
//!
//! ## Layout
//! - `traits::CpuOps` — halt / interrupt-mask contract.
//! - `x86::Cpu` — the one backend this crate ships.
//! - `pagedir` — the software stand-in for the hardware page directory the
//!   VM core treats as an external collaborator (create / destroy /
//!   activate / install / clear / inspect dirty bit).

pub mod traits;

#[cfg(target_arch = "x86_64")]
pub mod x86;

#[cfg(target_arch = "x86_64")]
pub use x86 as platform;

pub use platform::Cpu;
pub use traits::*;

pub mod pagedir;
