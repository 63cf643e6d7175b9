//! Generic HTML tokenizer and tree builder with source spans.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod tags;
pub mod tokens;

pub use parser::{parse, ParseTreeResult};
