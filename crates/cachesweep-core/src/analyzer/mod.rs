pub mod handler;
pub mod types;

pub use handler::Analyzer;
pub use types::{Analysis, AnalysisReport, OperationAnalysis};
