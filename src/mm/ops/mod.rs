//! # Operações de baixo nível
//!
//! `compiler` fornece os intrínsecos `memcpy`/`memset`/`memmove`/`memcmp`
//! que o compilador gera chamadas para mesmo em código `no_std`; `memops`
//! é a implementação que os sustenta.

pub mod compiler;
pub mod memops;
