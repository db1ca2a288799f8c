pub mod operations;
pub mod types;

pub use operations::{DEFAULT_PROGRESS_INTERVAL, DeletionEngine};
pub use types::{SubdirAccounting, TargetResult};
