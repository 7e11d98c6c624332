use std::path::PathBuf;

/// Result type alias for envdoctor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for envdoctor operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The command interpreter could not be started at all
    #[error("{}", format_command_error(.command, .message, .exit_code))]
    CommandExecution {
        command: String,
        message: String,
        exit_code: Option<i32>,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A bounded cache was asked for a capacity it cannot hold
    #[error("cache capacity must be greater than 0 (got {capacity})")]
    InvalidCapacity { capacity: usize },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A probe task died before producing a result
    #[error("probe '{probe}' aborted: {message}")]
    ProbeAborted { probe: String, message: String },

    /// A remediation procedure could not run to completion
    #[error("remediation for '{issue_id}' failed: {message}")]
    Remediation { issue_id: String, message: String },
}

fn format_command_error(command: &str, message: &str, exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("command '{command}' failed with exit code {code}: {message}"),
        None => format!("command '{command}' failed: {message}"),
    }
}

// Conversion implementations
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            message: message.into(),
            exit_code,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid capacity error
    #[must_use]
    pub fn invalid_capacity(capacity: usize) -> Self {
        Error::InvalidCapacity { capacity }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a probe abort error
    #[must_use]
    pub fn probe_aborted(probe: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ProbeAborted {
            probe: probe.into(),
            message: message.into(),
        }
    }

    /// Create a remediation error
    #[must_use]
    pub fn remediation(issue_id: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Remediation {
            issue_id: issue_id.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_display() {
        let err = Error::command_execution("sh", "No such file or directory", None);
        assert_eq!(err.to_string(), "command 'sh' failed: No such file or directory");

        let err = Error::command_execution("npm install", "boom", Some(2));
        assert_eq!(
            err.to_string(),
            "command 'npm install' failed with exit code 2: boom"
        );
    }

    #[test]
    fn test_invalid_capacity_message() {
        assert_eq!(
            Error::invalid_capacity(0).to_string(),
            "cache capacity must be greater than 0 (got 0)"
        );
    }
}
