//! Page-fault resolver — ports `handle_faulted_page` from `vm/page.c`.
//!
//! Takes the process's own supplemental page table and page directory as
//! explicit arguments rather than reaching for a `thread_current()`-style
//! global, preferring an explicit context object over implicit
//! globally-shared mutable state. `mm::vm::frame`/`mm::vm::swap` stay
//! genuine singletons underneath — the frame pool and the swap device
//! really are one shared resource, not per-process state.

use crate::arch::pagedir::{PageDirectory, SoftPageDir};
use crate::mm::addr::VirtAddr;
use crate::mm::config::{PAGE_SIZE, PHYS_BASE, PUSHA_BYTES, STACK_LIMIT};
use crate::mm::vm::frame;
use crate::mm::vm::page::{Page, PageState};
use crate::mm::vm::spt::Spt;
use crate::mm::vm::swap::SWAP_TABLE;
use crate::sync::Mutex;
use alloc::sync::Arc;

/// Materializes `page` into a frame if it isn't resident already, reading
/// its content from file or swap as its state dictates, then installs the
/// mapping. Returns `false` on resource exhaustion or a short file read —
/// the caller terminates the faulting process either way.
fn materialize(page: &Arc<Page>, pagedir: &Arc<Mutex<SoftPageDir>>) -> bool {
    let _pin = page.pin.lock();

    if matches!(&*page.state.lock(), PageState::InMemory { .. }) {
        // Another fault on this same page already won the race.
        return true;
    }

    let Some(new_frame) = frame::get_user_frame() else {
        return false;
    };

    let mut state = page.state.lock();
    let ok = match &*state {
        PageState::Zero => {
            let bytes = unsafe { new_frame.as_bytes_mut(PAGE_SIZE) };
            bytes.fill(0);
            true
        }
        PageState::InFile { file, offset, read_bytes, zero_bytes } => {
            let bytes = unsafe { new_frame.as_bytes_mut(PAGE_SIZE) };
            let read = file.read_at(*offset, &mut bytes[..*read_bytes]);
            if read != *read_bytes {
                false
            } else {
                bytes[*read_bytes..*read_bytes + *zero_bytes].fill(0);
                true
            }
        }
        PageState::InSwap { slot } => {
            let bytes = unsafe { new_frame.as_bytes_mut(PAGE_SIZE) };
            SWAP_TABLE.read_page(*slot, bytes);
            true
        }
        PageState::InMemory { .. } => true,
    };

    if !ok {
        frame::FRAME_TABLE.free_frame(new_frame);
        return false;
    }

    let mut dir = pagedir.lock();
    if dir.set_page(page.user_addr, new_frame, page.writable).is_err() {
        drop(dir);
        frame::FRAME_TABLE.free_frame(new_frame);
        return false;
    }
    // There is no real MMU here to set the hardware dirty bit on the first
    // store through a writable mapping, so a writable page is marked dirty
    // the moment it is installed: that is the earliest point a write could
    // happen, and it is what drives the dirty-preference eviction scan.
    if page.writable {
        dir.mark_dirty(page.user_addr);
    }
    drop(dir);

    frame::FRAME_TABLE.allocate_frame(new_frame, page, pagedir);
    *state = PageState::InMemory { frame: new_frame };
    true
}

/// `grow_stack` in the original.
fn grow_stack(spt: &Spt, pagedir: &Arc<Mutex<SoftPageDir>>, page_addr: VirtAddr) -> bool {
    let page = Page::zero(page_addr, true);
    if materialize(&page, pagedir) {
        spt.insert(page);
        true
    } else {
        false
    }
}

fn is_stack_access(fault_addr: VirtAddr, page_addr: VirtAddr, esp: u64) -> bool {
    let Some(distance) = (PHYS_BASE as u64).checked_sub(page_addr.as_u64()) else {
        return false;
    };
    let within_limit = distance as usize <= STACK_LIMIT;
    let at_or_above_esp = fault_addr.as_u64() + PUSHA_BYTES >= esp;
    within_limit && at_or_above_esp
}

/// `validate_user_buffer` in the original. Called before a syscall such as
/// `read`/`write` touches a buffer supplied by user code: walks the buffer
/// page by page and confirms every page lies in user address space and
/// has (or can be given) an SPT entry. `for_write` is set for a buffer the
/// kernel is about to write into (a `read` destination) — missing pages
/// there are grown as stack rather than rejected, so the real fault can't
/// happen re-entrantly while the syscall is holding the filesystem mutex.
/// A buffer the kernel only reads from (a `write` source) must already be
/// backed; a missing page there is an invalid argument, not a fault.
pub fn validate_user_buffer(spt: &Spt, pagedir: &Arc<Mutex<SoftPageDir>>, addr: VirtAddr, size: usize, for_write: bool) -> bool {
    if size == 0 {
        return true;
    }
    let Some(end) = addr.as_u64().checked_add(size as u64) else {
        return false;
    };
    if end > PHYS_BASE as u64 {
        return false;
    }

    let mut page_addr = addr.align_down(PAGE_SIZE as u64);
    while page_addr.as_u64() < end {
        if page_addr.as_u64() < PAGE_SIZE as u64 {
            return false;
        }
        if spt.lookup(page_addr).is_none() && (!for_write || !grow_stack(spt, pagedir, page_addr)) {
            return false;
        }
        page_addr = VirtAddr::new(page_addr.as_u64() + PAGE_SIZE as u64);
    }
    true
}

/// `handle_faulted_page` in the original. `esp` is the stack pointer
/// recorded in the interrupt frame at the moment of the fault, used to
/// distinguish a legitimate stack-growth access from a wild pointer.
pub fn handle_faulted_page(spt: &Spt, pagedir: &Arc<Mutex<SoftPageDir>>, fault_addr: VirtAddr, esp: u64) -> bool {
    if fault_addr.as_u64() >= PHYS_BASE as u64 {
        return false;
    }
    let page_addr = fault_addr.align_down(PAGE_SIZE as u64);

    match spt.lookup(fault_addr) {
        Some(page) => materialize(&page, pagedir),
        None if is_stack_access(fault_addr, page_addr, esp) => grow_stack(spt, pagedir, page_addr),
        None => false,
    }
}

#[cfg(feature = "self_test")]
pub mod self_test {
    use super::*;
    use crate::drivers::block::mem_disk::MemDisk;
    use crate::fs::File;
    use crate::klib::test_framework::TestResult;
    use crate::mm::pmm;
    use alloc::sync::Arc;
    use alloc::vec;

    fn fresh_fixture(frames: usize) -> (Spt, Arc<Mutex<SoftPageDir>>) {
        let arena = vec![0u8; frames * PAGE_SIZE].leak();
        pmm::init(crate::mm::addr::PhysAddr::new(arena.as_ptr() as u64), frames);
        SWAP_TABLE.init(Arc::new(MemDisk::new((frames * 8) as u64)));
        (Spt::new(), Arc::new(Mutex::new(SoftPageDir::create())))
    }

    crate::ktest!(stack_grows_one_page_below_phys_base, {
        let (spt, pagedir) = fresh_fixture(4);
        let fault_addr = VirtAddr::new(PHYS_BASE as u64 - 4);
        let esp = PHYS_BASE as u64 - 4;
        kassert!(handle_faulted_page(&spt, &pagedir, fault_addr, esp));
        kassert!(spt.len() == 1);
    });

    crate::ktest!(fault_below_esp_minus_pusha_is_rejected, {
        let (spt, pagedir) = fresh_fixture(4);
        let esp = PHYS_BASE as u64 - 4;
        let fault_addr = VirtAddr::new(esp - PUSHA_BYTES - PAGE_SIZE as u64);
        kassert!(!handle_faulted_page(&spt, &pagedir, fault_addr, esp));
    });

    crate::ktest!(fault_within_pusha_slack_grows_stack, {
        let (spt, pagedir) = fresh_fixture(4);
        let esp = PHYS_BASE as u64 - 4096;
        let fault_addr = VirtAddr::new(esp - PUSHA_BYTES);
        kassert!(handle_faulted_page(&spt, &pagedir, fault_addr, esp));
    });

    crate::ktest!(address_zero_is_never_a_stack_access, {
        let (spt, pagedir) = fresh_fixture(4);
        kassert!(!handle_faulted_page(&spt, &pagedir, VirtAddr::new(0), PHYS_BASE as u64));
    });

    crate::ktest!(stack_limit_boundary_is_rejected_just_past_it, {
        let (spt, pagedir) = fresh_fixture(4);
        let esp = (PHYS_BASE - STACK_LIMIT - PAGE_SIZE) as u64;
        let fault_addr = VirtAddr::new(esp);
        kassert!(!handle_faulted_page(&spt, &pagedir, fault_addr, esp));
    });

    crate::ktest!(repeated_fault_on_resident_page_is_idempotent, {
        let (spt, pagedir) = fresh_fixture(4);
        let fault_addr = VirtAddr::new(PHYS_BASE as u64 - 4);
        let esp = fault_addr.as_u64();
        kassert!(handle_faulted_page(&spt, &pagedir, fault_addr, esp));
        kassert!(handle_faulted_page(&spt, &pagedir, fault_addr, esp));
        kassert!(spt.len() == 1);
    });

    crate::ktest!(file_backed_fault_reads_exact_bytes, {
        let (spt, pagedir) = fresh_fixture(4);
        let data: alloc::vec::Vec<u8> = (0..PAGE_SIZE).map(|i| (i % 251) as u8).collect();
        let file = Arc::new(File::open(Arc::new(data.clone())));
        let page = Page::new(
            VirtAddr::new(0x0804_8000),
            false,
            PageState::InFile { file, offset: 0, read_bytes: PAGE_SIZE, zero_bytes: 0 },
        );
        spt.insert(page.clone());
        kassert!(handle_faulted_page(&spt, &pagedir, VirtAddr::new(0x0804_8000), 0));
        kassert!(matches!(&*page.state.lock(), PageState::InMemory { .. }));
    });

    crate::ktest!(validate_user_buffer_accepts_an_already_mapped_page, {
        let (spt, pagedir) = fresh_fixture(4);
        let addr = VirtAddr::new(PHYS_BASE as u64 - PAGE_SIZE as u64);
        kassert!(handle_faulted_page(&spt, &pagedir, addr, addr.as_u64()));
        kassert!(validate_user_buffer(&spt, &pagedir, addr, 16, false));
    });

    crate::ktest!(validate_user_buffer_grows_stack_for_a_write_destination, {
        let (spt, pagedir) = fresh_fixture(4);
        let addr = VirtAddr::new(PHYS_BASE as u64 - PAGE_SIZE as u64 + 10);
        kassert!(validate_user_buffer(&spt, &pagedir, addr, 8, true));
        kassert!(spt.len() == 1);
    });

    crate::ktest!(validate_user_buffer_rejects_missing_page_for_a_read_source, {
        let (spt, pagedir) = fresh_fixture(4);
        let addr = VirtAddr::new(PHYS_BASE as u64 - PAGE_SIZE as u64 + 10);
        kassert!(!validate_user_buffer(&spt, &pagedir, addr, 8, false));
        kassert!(spt.is_empty());
    });

    crate::ktest!(validate_user_buffer_rejects_page_zero, {
        let (spt, pagedir) = fresh_fixture(4);
        kassert!(!validate_user_buffer(&spt, &pagedir, VirtAddr::new(0), 8, true));
    });

    crate::ktest!(validate_user_buffer_rejects_kernel_address_space, {
        let (spt, pagedir) = fresh_fixture(4);
        kassert!(!validate_user_buffer(&spt, &pagedir, VirtAddr::new(PHYS_BASE as u64 - 4), 8, true));
    });

    crate::ktest!(validate_user_buffer_spans_multiple_pages, {
        let (spt, pagedir) = fresh_fixture(4);
        let addr = VirtAddr::new(PHYS_BASE as u64 - 2 * PAGE_SIZE as u64 + 10);
        kassert!(validate_user_buffer(&spt, &pagedir, addr, PAGE_SIZE + 20, true));
        kassert!(spt.len() == 2);
    });
}
