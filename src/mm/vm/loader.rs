//! ELF32 lazy program loader — ports `load`/`validate_segment`/
//! `load_segment`/`setup_stack` from `userprog/process.c`.
//!
//! `load_segment` never touches a frame: it only records `InFile` entries in
//! the supplemental page table, matching the original's own lazy-loading
//! design (the original only reads bytes off disk once a fault actually
//! hits one of these pages, in `allocate_file_page`). The stack is the one
//! piece of state this loader does materialize eagerly, because `argc`/
//! `argv` have to exist before the program's first instruction runs.

use crate::fs::File;
use crate::mm::addr::VirtAddr;
use crate::mm::config::{ARGS_LIMIT, MAX_PHNUM, PAGE_SIZE, PHYS_BASE};
use crate::mm::vm::error::{VmError, VmResult};
use crate::mm::vm::fault;
use crate::mm::vm::page::{Page, PageState};
use crate::mm::vm::spt::Spt;
use crate::arch::pagedir::{PageDirectory, SoftPageDir};
use crate::klib::string::Tokenizer;
use crate::sync::Mutex;
use alloc::sync::Arc;
use alloc::vec::Vec;

const EHDR_SIZE: usize = 52;
const PHDR_SIZE: usize = 32;

const ET_EXEC: u16 = 2;
const EM_386: u16 = 3;

const PT_NULL: u32 = 0;
const PT_LOAD: u32 = 1;
const PT_DYNAMIC: u32 = 2;
const PT_INTERP: u32 = 3;
const PT_NOTE: u32 = 4;
const PT_SHLIB: u32 = 5;
const PT_PHDR: u32 = 6;
const PT_STACK: u32 = 0x6474_e551;

const PF_W: u32 = 2;

fn le_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

fn le_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

pub struct LoadResult {
    pub entry_point: VirtAddr,
    pub initial_esp: VirtAddr,
}

/// Splits a combined `"program arg1 arg2"` command line into tokens,
/// dropping runs of repeated spaces the way `strtok_r` would.
pub fn tokenize_args(cmdline: &str) -> Vec<&str> {
    Tokenizer::new(cmdline, ' ').filter(|s| !s.is_empty()).collect()
}

/// `load()` in the original.
pub fn load_executable(
    file: Arc<File>,
    args: &[&str],
    spt: &Spt,
    pagedir: &Arc<Mutex<SoftPageDir>>,
) -> VmResult<LoadResult> {
    let mut ehdr = [0u8; EHDR_SIZE];
    if file.read_at(0, &mut ehdr) != EHDR_SIZE {
        return Err(VmError::BadElf("file shorter than an ELF header"));
    }
    validate_ehdr(&ehdr)?;

    let e_entry = le_u32(&ehdr, 24);
    let e_phoff = le_u32(&ehdr, 28) as usize;
    let e_phnum = le_u16(&ehdr, 44) as usize;

    // From here on nothing else may modify the file backing this address
    // space.
    file.deny_write();

    let mut file_ofs = e_phoff;
    for _ in 0..e_phnum {
        if file_ofs > file.length() {
            return Err(VmError::BadElf("program header offset beyond file"));
        }
        let mut phdr = [0u8; PHDR_SIZE];
        if file.read_at(file_ofs, &mut phdr) != PHDR_SIZE {
            return Err(VmError::BadElf("truncated program header"));
        }
        file_ofs += PHDR_SIZE;

        let p_type = le_u32(&phdr, 0);
        match p_type {
            PT_NULL | PT_NOTE | PT_PHDR | PT_STACK => continue,
            PT_DYNAMIC | PT_INTERP | PT_SHLIB => {
                return Err(VmError::BadSegment("unsupported segment type"))
            }
            PT_LOAD => {
                let p_offset = le_u32(&phdr, 4) as usize;
                let p_vaddr = le_u32(&phdr, 8) as usize;
                let p_filesz = le_u32(&phdr, 16) as usize;
                let p_memsz = le_u32(&phdr, 20) as usize;
                let p_flags = le_u32(&phdr, 24);
                validate_segment(p_offset, p_vaddr, p_filesz, p_memsz, file.length())?;

                let writable = (p_flags & PF_W) != 0;
                let file_page = p_offset & !(PAGE_SIZE - 1);
                let mem_page = p_vaddr & !(PAGE_SIZE - 1);
                let page_offset = p_vaddr & (PAGE_SIZE - 1);

                let (read_bytes, zero_bytes) = if p_filesz > 0 {
                    let read_bytes = page_offset + p_filesz;
                    let zero_bytes = align_up_usize(page_offset + p_memsz, PAGE_SIZE) - read_bytes;
                    (read_bytes, zero_bytes)
                } else {
                    (0, align_up_usize(page_offset + p_memsz, PAGE_SIZE))
                };

                load_segment(&file, file_page, VirtAddr::new(mem_page as u64), read_bytes, zero_bytes, writable, spt);
            }
            _ => continue,
        }
    }

    let initial_esp = setup_stack(spt, pagedir, args)?;

    Ok(LoadResult {
        entry_point: VirtAddr::new(e_entry as u64),
        initial_esp,
    })
}

fn align_up_usize(value: usize, align: usize) -> usize {
    (value + align - 1) & !(align - 1)
}

fn validate_ehdr(buf: &[u8]) -> VmResult<()> {
    if buf[0..7] != [0x7f, b'E', b'L', b'F', 1, 1, 1] {
        return Err(VmError::BadElf("bad magic, class, endianness, or version"));
    }
    let e_type = le_u16(buf, 16);
    let e_machine = le_u16(buf, 18);
    let e_version = le_u32(buf, 20);
    let e_phentsize = le_u16(buf, 42);
    let e_phnum = le_u16(buf, 44);

    if e_type != ET_EXEC {
        return Err(VmError::BadElf("not an executable"));
    }
    if e_machine != EM_386 {
        return Err(VmError::BadElf("not an i386 binary"));
    }
    if e_version != 1 {
        return Err(VmError::BadElf("unsupported ELF version"));
    }
    if e_phentsize as usize != PHDR_SIZE {
        return Err(VmError::BadElf("unexpected program header size"));
    }
    if e_phnum as usize > MAX_PHNUM {
        return Err(VmError::BadElf("too many program headers"));
    }
    Ok(())
}

/// `validate_segment` in the original.
fn validate_segment(p_offset: usize, p_vaddr: usize, p_filesz: usize, p_memsz: usize, file_len: usize) -> VmResult<()> {
    if (p_offset & (PAGE_SIZE - 1)) != (p_vaddr & (PAGE_SIZE - 1)) {
        return Err(VmError::BadSegment("file offset and vaddr misaligned against each other"));
    }
    if p_offset > file_len {
        return Err(VmError::BadSegment("offset points outside the file"));
    }
    if p_memsz < p_filesz {
        return Err(VmError::BadSegment("memsz smaller than filesz"));
    }
    if p_memsz == 0 {
        return Err(VmError::BadSegment("empty segment"));
    }
    if p_vaddr >= PHYS_BASE {
        return Err(VmError::BadSegment("segment starts outside user space"));
    }
    let Some(end) = p_vaddr.checked_add(p_memsz) else {
        return Err(VmError::BadSegment("segment wraps the address space"));
    };
    if end > PHYS_BASE {
        return Err(VmError::BadSegment("segment ends outside user space"));
    }
    if p_vaddr < PAGE_SIZE {
        return Err(VmError::BadSegment("segment maps page zero"));
    }
    Ok(())
}

/// `load_segment` in the original. Lazy: only installs `InFile` entries in
/// the supplemental page table, one per page the segment spans. Reading
/// the bytes happens later, in `mm::vm::fault`, on the page's first fault.
fn load_segment(
    file: &Arc<File>,
    mut ofs: usize,
    mut upage: VirtAddr,
    mut read_bytes: usize,
    mut zero_bytes: usize,
    writable: bool,
    spt: &Spt,
) {
    debug_assert_eq!((read_bytes + zero_bytes) % PAGE_SIZE, 0);

    while read_bytes > 0 || zero_bytes > 0 {
        let page_read_bytes = read_bytes.min(PAGE_SIZE);
        let page_zero_bytes = PAGE_SIZE - page_read_bytes;

        let page = Page::new(
            upage,
            writable,
            PageState::InFile {
                file: file.clone(),
                offset: ofs,
                read_bytes: page_read_bytes,
                zero_bytes: page_zero_bytes,
            },
        );
        spt.insert(page);

        read_bytes -= page_read_bytes;
        zero_bytes -= page_zero_bytes;
        upage = VirtAddr::new(upage.as_u64() + PAGE_SIZE as u64);
        ofs += PAGE_SIZE;
    }
}

fn push_byte(buf: &mut [u8], esp_offset: &mut usize, value: u8) -> VmResult<()> {
    if *esp_offset == 0 {
        return Err(VmError::BadElf("argument block overflowed the stack page"));
    }
    *esp_offset -= 1;
    buf[*esp_offset] = value;
    Ok(())
}

fn push_u32(buf: &mut [u8], esp_offset: &mut usize, value: u32) -> VmResult<()> {
    if *esp_offset < 4 {
        return Err(VmError::BadElf("argument block overflowed the stack page"));
    }
    *esp_offset -= 4;
    buf[*esp_offset..*esp_offset + 4].copy_from_slice(&value.to_le_bytes());
    Ok(())
}

/// `setup_stack` in the original, fixed: the original computed each
/// argument's length with `strlen(arguments[arg_index] + 1)`, one byte
/// short of the real length, which silently truncated the first character
/// of every argument pushed onto the stack. This copies the full string
/// (plus its own NUL) by construction — there is no stand-in length to get
/// wrong, since `&str` already knows its length.
fn setup_stack(spt: &Spt, pagedir: &Arc<Mutex<SoftPageDir>>, args: &[&str]) -> VmResult<VirtAddr> {
    if args.iter().map(|a| a.len() + 1).sum::<usize>() > ARGS_LIMIT {
        return Err(VmError::BadElf("argument list too long"));
    }

    let stack_page_addr = VirtAddr::new((PHYS_BASE - PAGE_SIZE) as u64);
    if !fault::handle_faulted_page(spt, pagedir, stack_page_addr, PHYS_BASE as u64) {
        return Err(VmError::NoFreeFrame);
    }
    let frame = pagedir
        .lock()
        .get_page(stack_page_addr)
        .ok_or(VmError::MappingCollision)?;
    let stack_bytes = unsafe { frame.as_bytes_mut(PAGE_SIZE) };

    let mut esp_offset = PAGE_SIZE;
    let mut arg_offsets = alloc::vec![0usize; args.len()];

    for i in (0..args.len()).rev() {
        push_byte(stack_bytes, &mut esp_offset, 0)?;
        for &b in args[i].as_bytes().iter().rev() {
            push_byte(stack_bytes, &mut esp_offset, b)?;
        }
        arg_offsets[i] = esp_offset;
    }

    // Pad to a 4-byte boundary so the argv pointer array that follows is
    // word-aligned, as the i386 System V ABI expects.
    let pad = esp_offset % 4;
    for _ in 0..pad {
        push_byte(stack_bytes, &mut esp_offset, 0)?;
    }

    let page_base = PHYS_BASE - PAGE_SIZE;
    push_u32(stack_bytes, &mut esp_offset, 0)?; // argv[argc] = NULL
    for i in (0..args.len()).rev() {
        push_u32(stack_bytes, &mut esp_offset, (page_base + arg_offsets[i]) as u32)?;
    }
    let argv_addr = (page_base + esp_offset) as u32;
    push_u32(stack_bytes, &mut esp_offset, argv_addr)?; // argv
    push_u32(stack_bytes, &mut esp_offset, args.len() as u32)?; // argc
    push_u32(stack_bytes, &mut esp_offset, 0)?; // fake return address

    Ok(VirtAddr::new((page_base + esp_offset) as u64))
}

#[cfg(feature = "self_test")]
pub mod self_test {
    use super::*;
    use crate::drivers::block::mem_disk::MemDisk;
    use crate::klib::test_framework::TestResult;
    use crate::mm::pmm;
    use crate::mm::vm::swap::SWAP_TABLE;
    use alloc::vec;

    fn fresh_fixture(frames: usize) -> (Spt, Arc<Mutex<SoftPageDir>>) {
        let arena = vec![0u8; frames * PAGE_SIZE].leak();
        pmm::init(crate::mm::addr::PhysAddr::new(arena.as_ptr() as u64), frames);
        SWAP_TABLE.init(Arc::new(MemDisk::new((frames * 8) as u64)));
        (Spt::new(), Arc::new(Mutex::new(SoftPageDir::create())))
    }

    fn build_elf(entry: u32, segments: &[(u32, &[u8], u32)]) -> Vec<u8> {
        // segments: (vaddr, file bytes, memsz)
        let phoff = EHDR_SIZE;
        let mut buf = alloc::vec![0u8; phoff + segments.len() * PHDR_SIZE];
        buf[0..7].copy_from_slice(&[0x7f, b'E', b'L', b'F', 1, 1, 1]);
        buf[16..18].copy_from_slice(&ET_EXEC.to_le_bytes());
        buf[18..20].copy_from_slice(&EM_386.to_le_bytes());
        buf[20..24].copy_from_slice(&1u32.to_le_bytes());
        buf[24..28].copy_from_slice(&entry.to_le_bytes());
        buf[28..32].copy_from_slice(&(phoff as u32).to_le_bytes());
        buf[42..44].copy_from_slice(&(PHDR_SIZE as u16).to_le_bytes());
        buf[44..46].copy_from_slice(&(segments.len() as u16).to_le_bytes());

        let mut data_ofs = buf.len();
        for (i, (vaddr, data, memsz)) in segments.iter().enumerate() {
            let ph = phoff + i * PHDR_SIZE;
            buf[ph..ph + 4].copy_from_slice(&PT_LOAD.to_le_bytes());
            buf[ph + 4..ph + 8].copy_from_slice(&(data_ofs as u32).to_le_bytes());
            buf[ph + 8..ph + 12].copy_from_slice(&vaddr.to_le_bytes());
            buf[ph + 12..ph + 16].copy_from_slice(&vaddr.to_le_bytes());
            buf[ph + 16..ph + 20].copy_from_slice(&(data.len() as u32).to_le_bytes());
            buf[ph + 20..ph + 24].copy_from_slice(&memsz.to_le_bytes());
            buf[ph + 24..ph + 28].copy_from_slice(&(4u32).to_le_bytes()); // PF_R|PF_W

            buf.extend_from_slice(data);
            data_ofs += data.len();
        }
        buf
    }

    crate::ktest!(three_page_segment_gets_exact_read_zero_split, {
        let (spt, pagedir) = fresh_fixture(4);
        // One PT_LOAD segment spanning exactly 2 pages of file content and
        // a 3rd page that is entirely zero-fill (memsz > filesz).
        let data = vec![0x42u8; PAGE_SIZE * 2];
        let elf = build_elf(0x0804_8000, &[(0x0804_8000, &data, (PAGE_SIZE * 3) as u32)]);
        let file = Arc::new(File::open(Arc::new(elf)));

        let result = load_executable(file, &["prog"], &spt, &pagedir).expect("load");
        kassert!(result.entry_point.as_u64() == 0x0804_8000);
        kassert!(spt.len() == 3 + 1); // 3 segment pages + 1 stack page

        let p0 = spt.lookup(VirtAddr::new(0x0804_8000)).unwrap();
        let p1 = spt.lookup(VirtAddr::new(0x0804_8000 + PAGE_SIZE as u64)).unwrap();
        let p2 = spt.lookup(VirtAddr::new(0x0804_8000 + 2 * PAGE_SIZE as u64)).unwrap();
        kassert!(matches!(&*p0.state.lock(), PageState::InFile { read_bytes, zero_bytes, .. } if *read_bytes == PAGE_SIZE && *zero_bytes == 0));
        kassert!(matches!(&*p1.state.lock(), PageState::InFile { read_bytes, zero_bytes, .. } if *read_bytes == PAGE_SIZE && *zero_bytes == 0));
        kassert!(matches!(&*p2.state.lock(), PageState::InFile { read_bytes, zero_bytes, .. } if *read_bytes == 0 && *zero_bytes == PAGE_SIZE));
    });

    crate::ktest!(argv_strings_land_intact_on_the_stack, {
        let (spt, pagedir) = fresh_fixture(4);
        let elf = build_elf(0x0804_8000, &[(0x0804_8000, &[0u8; 16], 16)]);
        let file = Arc::new(File::open(Arc::new(elf)));

        let result = load_executable(file, &["echo", "hi"], &spt, &pagedir).expect("load");
        let stack_page = VirtAddr::new((PHYS_BASE - PAGE_SIZE) as u64);
        let frame = pagedir.lock().get_page(stack_page).unwrap();
        let bytes = unsafe { frame.as_bytes(PAGE_SIZE) };

        let esp_in_page = result.initial_esp.as_u64() as usize - (PHYS_BASE - PAGE_SIZE);
        let argc = u32::from_le_bytes(bytes[esp_in_page + 4..esp_in_page + 8].try_into().unwrap());
        kassert!(argc == 2);

        let argv_ptr = u32::from_le_bytes(bytes[esp_in_page + 8..esp_in_page + 12].try_into().unwrap());
        // argv points at the array itself, which this loader always lays
        // out immediately after the argc/argv slots.
        kassert!(argv_ptr as usize == (PHYS_BASE - PAGE_SIZE) + esp_in_page + 12);

        let argv0_ptr = u32::from_le_bytes(bytes[esp_in_page + 12..esp_in_page + 16].try_into().unwrap());
        let argv0_in_page = argv0_ptr as usize - (PHYS_BASE - PAGE_SIZE);
        kassert!(&bytes[argv0_in_page..argv0_in_page + 5] == b"echo\0");
    });

    crate::ktest!(oversized_phnum_is_rejected, {
        let mut ehdr = [0u8; EHDR_SIZE];
        ehdr[0..7].copy_from_slice(&[0x7f, b'E', b'L', b'F', 1, 1, 1]);
        ehdr[16..18].copy_from_slice(&ET_EXEC.to_le_bytes());
        ehdr[18..20].copy_from_slice(&EM_386.to_le_bytes());
        ehdr[20..24].copy_from_slice(&1u32.to_le_bytes());
        ehdr[28..32].copy_from_slice(&(EHDR_SIZE as u32).to_le_bytes());
        ehdr[42..44].copy_from_slice(&(PHDR_SIZE as u16).to_le_bytes());
        ehdr[44..46].copy_from_slice(&(1025u16).to_le_bytes());
        kassert!(validate_ehdr(&ehdr) == Err(VmError::BadElf("too many program headers")));
    });

    crate::ktest!(tokenizer_drops_repeated_spaces, {
        let tokens = tokenize_args("echo  hi   there");
        kassert!(tokens == alloc::vec!["echo", "hi", "there"]);
    });
}
