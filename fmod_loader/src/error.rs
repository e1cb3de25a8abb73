use fmod_types::DescriptorError;
use std::path::PathBuf;
use thiserror::Error;

/* Errors raised while turning a descriptor document into a module */
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read descriptor file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML descriptor: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse YAML descriptor: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("failed to parse JSON descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid module descriptor ({} error(s)):{}", .errors.len(), format_errors(.errors))]
    Invalid { errors: Vec<DescriptorError> },
}

fn format_errors(errors: &[DescriptorError]) -> String {
    errors.iter().map(|e| format!("\n  - {}", e)).collect()
}

impl From<Vec<DescriptorError>> for LoadError {
    fn from(errors: Vec<DescriptorError>) -> Self {
        LoadError::Invalid { errors }
    }
}
