pub mod string;

pub use string::{strcmp, strlen, strncmp, Tokenizer};
