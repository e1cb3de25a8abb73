use crate::types::FieldKind;
use crate::value::LiteralError;
use thiserror::Error;

/// Result alias used across the descriptor crates.
pub type DescriptorResult<T> = Result<T, DescriptorError>;

/// Any inconsistency in a module descriptor. All of them are fatal for a
/// generation run.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum DescriptorError {
    /// Errors raised while checking one derived type.
    #[error("in derived type '{type_name}': {source}")]
    InType {
        type_name: String,
        #[source]
        source: Box<DescriptorError>,
    },

    #[error("field '{field}' has unhandled type '{name}'")]
    UnknownFieldKind { field: String, name: String },

    #[error("parameter '{parameter}' has unhandled type '{name}'")]
    UnknownParameterKind { parameter: String, name: String },

    #[error("field '{field}' has unhandled attribute '{name}'")]
    UnknownAttribute { field: String, name: String },

    #[error("field '{field}' has dimension parameter '{parameter}', which is not a declared parameter")]
    UnknownParameter { field: String, parameter: String },

    #[error("field '{field}' has dimension parameter '{parameter}', which is a non-integer type: {kind}")]
    NonIntegerParameter {
        field: String,
        parameter: String,
        kind: FieldKind,
    },

    #[error("field '{field}' has dimension parameter '{parameter}' whose value '{value}' does not parse as an integer")]
    UnparsableDimension {
        field: String,
        parameter: String,
        value: String,
    },

    #[error("field '{field}' has non-positive size {size} on dimension {axis}")]
    NonPositiveDimension { field: String, axis: usize, size: i64 },

    #[error("field '{field}' has more than {limit} elements")]
    ExtentOverflow { field: String, limit: usize },

    #[error("asked for size of dimension {axis} of field '{field}', which only has {rank} dimensions")]
    AxisOutOfRange { field: String, axis: usize, rank: usize },

    #[error("field '{field}' is a string with {rank} dimensions; arrays of strings are not supported")]
    StringArray { field: String, rank: usize },

    #[error("field '{field}' has an invalid size element at index {index}: {reason}")]
    InvalidSizeElement {
        field: String,
        index: usize,
        reason: String,
    },

    #[error("field '{field}' has invalid data at index {index}: {source}")]
    InvalidFieldData {
        field: String,
        index: usize,
        #[source]
        source: LiteralError,
    },

    #[error("parameter '{parameter}' has an invalid value: {source}")]
    InvalidParameterValue {
        parameter: String,
        #[source]
        source: LiteralError,
    },

    #[error("parameter '{name}' is declared more than once (names are case-insensitive)")]
    DuplicateParameter { name: String },

    #[error("derived type '{name}' is declared more than once (names are case-insensitive)")]
    DuplicateType { name: String },

    #[error("field '{name}' is declared more than once (names are case-insensitive)")]
    DuplicateField { name: String },

    #[error("derived type '{name}' has no fields")]
    EmptyDerivedType { name: String },

    #[error("derived type '{name}' is listed but has no table")]
    MissingDerivedType { name: String },
}

impl DescriptorError {
    /// Attach the owning derived type to a field-level error.
    pub fn in_type(self, type_name: &str) -> Self {
        DescriptorError::InType {
            type_name: type_name.to_string(),
            source: Box::new(self),
        }
    }
}
