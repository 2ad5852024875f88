//! # Placeholder Expressions
//!
//! Raw value → `Expression` is a pure function. No store access, no errors:
//! malformed input degrades to literal text.

pub mod ast;
pub mod parser;

pub use ast::{Expression, Reference, Segment};
pub use parser::{parse, parse_with, MAX_DEFAULT_NESTING};
