//! Error types for manifest loading and descriptor construction.

use param_descriptor_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while loading or building a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// File extension is neither JSON nor YAML.
    #[error("unsupported manifest format: {0}")]
    UnsupportedFormat(String),

    /// A param entry has an empty name.
    #[error("param name cannot be empty")]
    EmptyParamName,

    /// A param name is reused for a different descriptor kind.
    #[error("param `{0}` redeclared with a different kind")]
    DuplicateParam(String),

    /// The descriptor's schema field failed validation.
    #[error("invalid param `{name}`: {source}")]
    Validation {
        /// Name of the offending param.
        name: String,
        /// Underlying schema-field error.
        #[source]
        source: ValidationError,
    },
}

/// Convenience alias for results with [`ManifestError`].
pub type Result<T> = std::result::Result<T, ManifestError>;
