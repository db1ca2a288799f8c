use crate::errors::SweepError;

#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("Failed to write run log: {source}")]
    JournalWrite {
        #[from]
        source: std::io::Error,
    },

    #[error("Operation '{name}' panicked: {message}")]
    Panicked { name: String, message: String },
}

impl SweepError for OperationError {
    fn error_code(&self) -> &'static str {
        match self {
            OperationError::JournalWrite { .. } => "OPERATION_JOURNAL_WRITE_FAILED",
            OperationError::Panicked { .. } => "OPERATION_PANICKED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_write_from_io() {
        let error: OperationError =
            std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(error.error_code(), "OPERATION_JOURNAL_WRITE_FAILED");
        assert!(error.to_string().contains("disk full"));
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_panicked_display() {
        let error = OperationError::Panicked {
            name: "Temp Files".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(error.to_string(), "Operation 'Temp Files' panicked: boom");
    }
}
