pub mod errors;
pub mod external;
pub mod handler;
pub mod types;

pub use errors::OperationError;
pub use handler::Executor;
pub use types::OperationResult;
