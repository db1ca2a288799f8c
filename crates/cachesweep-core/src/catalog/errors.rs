use crate::errors::SweepError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {message}")]
    ParseFailed { message: String },

    #[error("Catalog contains an operation with an empty name")]
    EmptyName,

    #[error("Duplicate operation name '{name}' in catalog")]
    DuplicateName { name: String },

    #[error("Operation '{name}' has no targets")]
    MissingTargets { name: String },

    #[error("Operation '{name}' is an external tool but has no program")]
    MissingProgram { name: String },

    #[error("Operation '{name}' has an invalid target: {message}")]
    InvalidTarget { name: String, message: String },

    #[error("Unknown operation '{name}'")]
    UnknownOperation { name: String },
}

impl SweepError for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            CatalogError::ReadFailed { .. } => "CATALOG_READ_FAILED",
            CatalogError::ParseFailed { .. } => "CATALOG_PARSE_FAILED",
            CatalogError::EmptyName => "CATALOG_EMPTY_NAME",
            CatalogError::DuplicateName { .. } => "CATALOG_DUPLICATE_NAME",
            CatalogError::MissingTargets { .. } => "CATALOG_MISSING_TARGETS",
            CatalogError::MissingProgram { .. } => "CATALOG_MISSING_PROGRAM",
            CatalogError::InvalidTarget { .. } => "CATALOG_INVALID_TARGET",
            CatalogError::UnknownOperation { .. } => "CATALOG_UNKNOWN_OPERATION",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, CatalogError::ReadFailed { .. })
    }
}
