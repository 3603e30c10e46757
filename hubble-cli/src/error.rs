//! CLI-specific error types and exit code mapping

use hubble_core::error::HubbleError;
use hubble_filters::FilterError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filter spec loading or compilation failure.
    #[error("filter error: {0}")]
    Filter(String),

    /// Logging initialisation or other command failure.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (input read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                         |
    /// |------|---------------------------------|
    /// | 0    | Success                         |
    /// | 1    | General / command error         |
    /// | 2    | Configuration error             |
    /// | 3    | Filter spec error               |
    /// | 10   | IO error                        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Filter(_) => 3,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<HubbleError> for CliError {
    fn from(e: HubbleError) -> Self {
        match e {
            HubbleError::Config(e) => Self::Config(e.to_string()),
            HubbleError::Filter(reason) => Self::Filter(reason),
            HubbleError::Io(e) => Self::Io(e),
            HubbleError::Decode(e) => Self::JsonSerialize(e),
        }
    }
}

impl From<FilterError> for CliError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e.to_string())
    }
}
