//! Error types for the Atomiq bet verifier
//!
//! Leaf errors are raised close to the code that fails; `AtomiqError` is the
//! root the binary and the bet-source flow report through.

use std::fmt;

/// Root error type for all verifier operations
#[derive(Debug)]
pub enum AtomiqError {
    /// Configuration loading and validation errors
    Configuration(ConfigurationError),

    /// Runtime lacks a capability the verifier needs
    Environment(EnvironmentError),

    /// Bet record source (REST API) errors
    Client(ClientError),

    /// Local bet record documents that cannot be read or parsed
    Input(InputError),
}

/// Configuration and validation errors
#[derive(Debug)]
pub enum ConfigurationError {
    ValidationFailed(String),
    InvalidValue { field: String, value: String, reason: String },
    LoadFailed(String),
}

/// Bet record documents supplied on disk or stdin
#[derive(Debug)]
pub enum InputError {
    ReadFailed(String),
    ParseFailed(String),
    Empty,
}

/// The hashing capability is not available.
///
/// This is not a verification outcome: no verdict can be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    #[error("SHA256 not available in this environment ({provider})")]
    HashUnavailable { provider: String },
}

/// Errors talking to the casino REST API
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Too many requests. Please slow down and try again.")]
    RateLimited,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: Unable to connect to the API server")]
    Network(#[source] reqwest::Error),

    #[error("Failed to decode API response: {0}")]
    Decode(String),

    #[error("Transaction not found: {tx_hash}")]
    NotFound { tx_hash: String },

    #[error("Request failed: {0}")]
    Request(String),
}

impl ClientError {
    /// HTTP status associated with the error, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RateLimited => Some(429),
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-readable code, mirroring the API's error codes.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::RateLimited => "RATE_LIMIT",
            ClientError::Http { .. } => "HTTP_ERROR",
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::NotFound { .. } => "NOT_FOUND",
            ClientError::Request(_) => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for AtomiqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomiqError::Configuration(e) => write!(f, "Configuration error: {}", e),
            AtomiqError::Environment(e) => write!(f, "Environment error: {}", e),
            AtomiqError::Client(e) => write!(f, "API error: {}", e),
            AtomiqError::Input(e) => write!(f, "Input error: {}", e),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::ValidationFailed(msg) => write!(f, "Validation failed: {}", msg),
            ConfigurationError::InvalidValue { field, value, reason } => {
                write!(f, "Invalid value for {}: '{}' ({})", field, value, reason)
            }
            ConfigurationError::LoadFailed(msg) => {
                write!(f, "Failed to load configuration: {}", msg)
            }
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::ReadFailed(msg) => write!(f, "Failed to read bet record: {}", msg),
            InputError::ParseFailed(msg) => write!(f, "Failed to parse bet record: {}", msg),
            InputError::Empty => write!(f, "No bet records found in input"),
        }
    }
}

impl std::error::Error for AtomiqError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AtomiqError::Configuration(e) => Some(e),
            AtomiqError::Environment(e) => Some(e),
            AtomiqError::Client(e) => Some(e),
            AtomiqError::Input(e) => Some(e),
        }
    }
}

impl std::error::Error for ConfigurationError {}
impl std::error::Error for InputError {}

impl From<ConfigurationError> for AtomiqError {
    fn from(e: ConfigurationError) -> Self {
        AtomiqError::Configuration(e)
    }
}

impl From<EnvironmentError> for AtomiqError {
    fn from(e: EnvironmentError) -> Self {
        AtomiqError::Environment(e)
    }
}

impl From<ClientError> for AtomiqError {
    fn from(e: ClientError) -> Self {
        AtomiqError::Client(e)
    }
}

impl From<InputError> for AtomiqError {
    fn from(e: InputError) -> Self {
        AtomiqError::Input(e)
    }
}

impl From<std::io::Error> for AtomiqError {
    fn from(e: std::io::Error) -> Self {
        AtomiqError::Input(InputError::ReadFailed(e.to_string()))
    }
}

impl From<serde_json::Error> for AtomiqError {
    fn from(e: serde_json::Error) -> Self {
        AtomiqError::Input(InputError::ParseFailed(e.to_string()))
    }
}

impl From<toml::de::Error> for AtomiqError {
    fn from(e: toml::de::Error) -> Self {
        AtomiqError::Configuration(ConfigurationError::LoadFailed(e.to_string()))
    }
}

// Convenience type alias for Results
pub type AtomiqResult<T> = Result<T, AtomiqError>;
