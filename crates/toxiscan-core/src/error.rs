//! Error types for toxiscan

/// Result type alias using toxiscan's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for toxiscan operations
///
/// Classification itself never fails; these errors only surface while
/// building a catalog, loading configuration or wiring a backend.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A catalog rule failed to compile
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Secondary backend construction errors
    #[error("backend error: {0}")]
    Backend(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
