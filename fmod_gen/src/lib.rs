//! Cross-representation code generation for module descriptors.
//!
//! From one validated `Module` this crate emits a Fortran module with
//! `bind(C)` derived types and a C header mirroring the same records with a
//! C++ overlay on top. The two artifacts share the dimension resolver, the
//! literal formatter and the string buffer contract, which is what keeps
//! their memory layouts identical.

pub mod codegen;
pub mod comment;
pub mod error;
pub mod literal;
pub mod strings;

pub use codegen::c::CCodeGenerator;
pub use codegen::fortran::FortranModuleGenerator;
pub use codegen::{artifact_paths, generate, write_artifacts, Artifacts, GeneratorOptions};
pub use error::GenError;
