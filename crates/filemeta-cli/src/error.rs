//! Error types for the filemeta CLI
//!
//! Every variant is fatal for the run: the error is reported, nothing is
//! written, and the process exits with status 1.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Host configuration file is missing
    #[error("Config file not found: '{0}'. Pass --paths to scan locally or --config to point at a host configuration.")]
    ConfigNotFound(String),

    /// Host configuration has invalid content
    #[error("Invalid host configuration: {0}")]
    InvalidConfig(String),

    /// YAML parsing failed
    #[error("Failed to parse YAML: {0}. Check the file syntax at the indicated line/column.")]
    YamlParse(#[from] serde_yaml::Error),

    /// Could not open a session to a remote host
    #[error("Failed to connect to '{host}': {message}. Check host, user, port and key in the configuration.")]
    RemoteSession { host: String, message: String },

    /// Remote file listing could not be run
    #[error("Remote listing on '{host}' failed: {message}")]
    RemoteQuery { host: String, message: String },

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Writing the report failed
    #[error("Failed to write report: {0}")]
    Csv(#[from] csv::Error),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a remote session error
    pub fn remote_session(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteSession {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Create a remote query error
    pub fn remote_query(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteQuery {
            host: host.into(),
            message: message.into(),
        }
    }
}
