use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while assembling or loading a tool catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A tool was registered with a blank name
    #[error("Tool name must not be empty")]
    EmptyToolName,

    /// Two tools share the same name
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    /// Catalog file declares a schema this build does not understand
    #[error("Catalog schema_version {0} is not supported (expected 1)")]
    UnsupportedSchema(u32),

    /// IO error while reading a catalog file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed catalog document
    #[error("Catalog parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
