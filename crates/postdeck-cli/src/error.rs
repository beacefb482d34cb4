//! CLI error type

use thiserror::Error;

use postdeck_config::ConfigError;
use postdeck_domain::DomainError;
use postdeck_persistence::PersistenceError;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'postdeck --help' for usage information.", message)
            }
            CliError::Domain(DomainError::InUse { .. }) => {
                format!("{}\n\nPoint the account at another list first.", self)
            }
            CliError::Domain(e) => e.to_string(),
            CliError::Persistence(PersistenceError::NotFound { .. }) => {
                "Nothing to undo.".to_string()
            }
            CliError::Persistence(PersistenceError::NoRedo) => "Nothing to redo.".to_string(),
            CliError::Persistence(e) => {
                format!("Storage error: {}\n\nCheck the data directory.", e)
            }
            CliError::Config(e) => {
                format!("{}\n\nCheck postdeck.toml and POSTDECK_* variables.", e)
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

pub type CliResult<T> = Result<T, CliError>;
