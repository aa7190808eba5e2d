//! Error types and error reporting for the front end.
//!
//! This module defines the error types produced while tokenizing and
//! parsing. It includes:
//!
//! - Error structures carrying the line/position of the offending token
//! - The error taxonomy (lexical, syntax, name, type and structural errors)
//! - The single reporting function every diagnostic goes through

pub mod diagnostics;
pub mod errors;
