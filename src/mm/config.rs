//! # Configuração do Módulo de Memória
//!
//! Architectural constants for the virtual memory subsystem, plus the
//! kernel heap's own layout.

// =============================================================================
// CONSTANTES DE TAMANHO
// =============================================================================

/// Page size (4 KiB).
pub const PAGE_SIZE: usize = 4096;

/// Bits of page offset — also the SPT hash-key shift (`user_page >> PAGE_BITS`).
pub const PAGE_BITS: usize = 12;

// =============================================================================
// USER VIRTUAL ADDRESS SPACE LAYOUT
// =============================================================================

/// Top of user virtual address space; `PHYS_BASE - PAGE_SIZE` holds the
/// initial stack page. Named after the Pintos constant it replaces; there
/// is no physical-memory meaning here, only a user/kernel split point.
pub const PHYS_BASE: usize = 0xC000_0000;

/// Maximum distance a stack may grow below `PHYS_BASE` (8 MiB).
pub const STACK_LIMIT: usize = 8 * 1024 * 1024;

// =============================================================================
// SWAP DEVICE GEOMETRY
// =============================================================================

/// Sector size of the swap block device.
pub const BLOCK_SECTOR_SIZE: usize = 512;

/// Sectors needed to hold one page; a swap slot is this many contiguous
/// sectors.
pub const BLOCKS_PER_PAGE: usize = PAGE_SIZE / BLOCK_SECTOR_SIZE;

// =============================================================================
// PROCESS / LOADER CONSTANTS
// =============================================================================

/// Slack, in bytes, below the faulting `esp` still treated as a stack
/// access — accommodates a `PUSHA`-style instruction.
pub const PUSHA_BYTES: u64 = 32;

/// Maximum bytes of command-line arguments accepted by the loader.
pub const ARGS_LIMIT: usize = PAGE_SIZE;

/// Maximum ELF program headers the loader will walk.
pub const MAX_PHNUM: usize = 1024;

// =============================================================================
// KERNEL HEAP LAYOUT
// =============================================================================

/// Base address of the kernel heap arena.
pub const HEAP_VIRT_BASE: usize = 0xFFFF_9000_0000_0000;

/// Initial heap size (16 MiB).
pub const HEAP_INITIAL_SIZE: usize = 16 * 1024 * 1024;

// =============================================================================
// FUNÇÕES UTILITÁRIAS
// =============================================================================

/// Alinha valor para cima ao múltiplo de align
#[inline(always)]
pub const fn align_up(val: usize, align: usize) -> usize {
    (val + align - 1) & !(align - 1)
}

/// Alinha valor para baixo ao múltiplo de align
#[inline(always)]
pub const fn align_down(val: usize, align: usize) -> usize {
    val & !(align - 1)
}

/// Verifica se valor está alinhado
#[inline(always)]
pub const fn is_aligned(val: usize, align: usize) -> bool {
    val & (align - 1) == 0
}
