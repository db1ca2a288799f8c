pub mod errors;
pub mod handler;
pub mod sink;
pub mod types;

pub use errors::WorkerError;
pub use handler::{DEFAULT_APP_NAME, Worker, WorkerHandle};
pub use sink::{CallbackSink, EventSink, NullSink};
pub use types::{RunSummary, WorkerEvent, WorkerState};
