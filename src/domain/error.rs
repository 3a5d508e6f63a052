//! Domain error types.

/// Top-level error type for pipjournal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("import rejected: {reason}")]
    ImportShape { reason: String },

    #[error("storage error: {reason}")]
    Storage { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl JournalError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        JournalError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        let code: u8 = match err {
            JournalError::Io(_) => 1,
            JournalError::ConfigParse { .. } | JournalError::ConfigInvalid { .. } => 2,
            JournalError::Storage { .. } => 3,
            JournalError::Validation { .. } => 4,
            JournalError::ImportShape { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
