use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Decode error at line {line}, column {column}: {message}")]
    DecodeError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[source] serde_json::Error),

    #[error("Unsupported state format version '{found}' (expected '{expected}')")]
    UnsupportedFormatVersion { found: String, expected: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl StateError {
    /// Wraps a `serde_json` error raised while reading a document, keeping its position.
    pub fn decode(err: serde_json::Error) -> Self {
        StateError::DecodeError {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    /// Process exit code used by the `tfstate` binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            StateError::InvalidConfigValueError { .. } => 1,
            StateError::DecodeError { .. } => 2,
            StateError::UnsupportedFormatVersion { .. } => 3,
            StateError::IoError(_) | StateError::SerializationError(_) => 4,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StateError::IoError(_) => "Check that the state file exists and is readable",
            StateError::DecodeError { .. } => {
                "Make sure the file is the JSON output of `terraform show -json`"
            }
            StateError::SerializationError(_) => "Re-run with --verbose for details",
            StateError::UnsupportedFormatVersion { .. } => {
                "Drop --strict to read the document anyway, or upgrade this tool"
            }
            StateError::InvalidConfigValueError { .. } => "Run with --help to see valid options",
        }
    }
}

pub type Result<T> = std::result::Result<T, StateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keeps_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        match StateError::decode(err) {
            StateError::DecodeError { line, column, .. } => {
                assert_eq!(line, 2);
                assert!(column > 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_exit_codes() {
        let err = StateError::UnsupportedFormatVersion {
            found: "1.0".to_string(),
            expected: "0.1".to_string(),
        };
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("'1.0'"));
    }
}
