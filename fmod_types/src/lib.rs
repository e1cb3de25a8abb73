//! Descriptor Model
//!
//! This crate contains the in-memory description of a generated module:
//! parameters, fields, derived types and the module that owns them, plus
//! the dimension resolver every emitter shares. It provides pure data
//! structures and invariant-checking accessors without any file I/O or
//! code generation logic.

pub mod dims;
pub mod error;
pub mod types;
pub mod value;

// Re-export commonly used types at the crate root
pub use dims::*;
pub use error::*;
pub use types::*;
pub use value::*;
