use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The store cannot be built from the given configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Page already exists: {0}")]
    PageExists(String),

    /// A character or byte sequence has no representation in the configured charset.
    #[error("Encoding error ({charset}): {detail}")]
    Encoding { charset: String, detail: String },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Attribute limit exceeded: {0}")]
    AttributeLimit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
