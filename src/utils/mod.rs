//! Utility functions for code generation and snippet encryption.
//!
//! - [`code_generator`] - Short code generation and shape validation
//! - [`cipher`] - Authenticated encryption of snippet content

pub mod cipher;
pub mod code_generator;
