//! Kizami Tokenizer Library
//!
//! This library provides a regex-driven tokenizer and a cursor-based token
//! stream navigator, intended as the substrate for hand-written
//! recursive-descent parsers of small DSLs.

pub mod error;
pub mod iterator;
pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use error::{ConfigError, KizamiError, KizamiResult, TokenizeError};
pub use iterator::{Filter, TokenIterator};
pub use token::{Position, Token};
pub use tokenizer::{PatternTable, Tokenizer};
