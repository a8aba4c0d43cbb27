use thiserror::Error;

/// Errors raised while loading the product fixture.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate product id in fixture: {0}")]
    DuplicateId(String),
    #[error("Fixture contains no products")]
    Empty,
}
