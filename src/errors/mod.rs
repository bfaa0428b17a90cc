//! Error types for the scanner.
//!
//! - Error structures with source position information
//! - The illegal character failure raised by `tokenize`
//! - Error formatting and display functionality

pub mod errors;
