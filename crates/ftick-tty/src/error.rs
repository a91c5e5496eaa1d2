use std::path::PathBuf;

use ftick_core::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot read messages file {path}: {source}")]
    MessagesFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("logging setup failed: {message}")]
    Logging { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl HostError {
    /// Process exit code: 2 for bad input, 1 for runtime failures.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::MessagesFile { .. } | Self::InvalidArgument { .. } => 2,
            Self::Io(_) | Self::Logging { .. } => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HostError;
    use ftick_core::ConfigError;

    #[test]
    fn bad_input_exits_with_two() {
        assert_eq!(HostError::invalid("windows must be > 0").exit_code(), 2);
        let error = HostError::from(ConfigError::Validation(vec!["speed must be > 0".into()]));
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.to_string(),
            "config error: validation errors: speed must be > 0"
        );
    }

    #[test]
    fn runtime_failures_exit_with_one() {
        let error = HostError::from(std::io::Error::other("tty gone"));
        assert_eq!(error.exit_code(), 1);
        assert_eq!(error.to_string(), "I/O error: tty gone");
    }
}
