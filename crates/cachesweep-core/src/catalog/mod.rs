pub mod errors;
pub mod loading;
pub mod registry;
pub mod types;

// Public API exports
pub use errors::CatalogError;
pub use loading::{load_catalog_file, parse_catalog};
pub use registry::Catalog;
pub use types::{Location, OperationKind, OperationSpec, TargetSpec};
