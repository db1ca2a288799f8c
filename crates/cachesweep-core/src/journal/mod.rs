pub mod format;
pub mod history;
pub mod writer;

pub use format::format_size;
pub use history::{LogFileInfo, is_complete, list_logs};
pub use writer::{LogHeader, LogLevel, RunLog};
