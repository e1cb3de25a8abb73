//! Module Descriptor Loading
//!
//! This crate reads a module descriptor document from disk (TOML, YAML or
//! JSON), maps it onto the descriptor model and validates it. Validation is
//! all-or-nothing: either every parameter, type and field checks out and a
//! `Module` is returned, or every problem found is reported together.

pub mod builder;
pub mod error;
pub mod file;

use std::path::Path;

pub use builder::build_module;
pub use error::LoadError;
pub use file::{DescriptorFile, DescriptorFormat, RawModule};

// Re-export fmod_types for convenience
pub use fmod_types;

use fmod_types::Module;

/* Parse a descriptor document held in memory */
pub fn parse_module(text: &str, format: DescriptorFormat) -> Result<Module, LoadError> {
    let file: DescriptorFile = match format {
        DescriptorFormat::Toml => toml::from_str(text)?,
        DescriptorFormat::Yaml => serde_yml::from_str(text)?,
        DescriptorFormat::Json => serde_json::from_str(text)?,
    };
    Ok(build_module(file.module)?)
}

/* Load and validate a descriptor file; the format follows the extension */
pub fn load_module(path: &Path) -> Result<Module, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("loaded descriptor {} ({} bytes)", path.display(), text.len());
    parse_module(&text, DescriptorFormat::from_path(path))
}
