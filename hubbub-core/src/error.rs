//! Error types for hub requests

use std::fmt;
use thiserror::Error;

/// Result type for hub operations
pub type Result<T> = std::result::Result<T, HubError>;

/// Boxed transport error, kept intact as the error source
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The phase of a hub request a component was called in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collecting default options
    Options,
    /// Collecting body parameters
    Parameters,
    /// Mutating the pending request
    ModifyRequest,
}

impl Phase {
    /// Name of the phase as it appears in logs and errors
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Options => "options",
            Self::Parameters => "parameters",
            Self::ModifyRequest => "modify_request",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while composing or executing a hub request
#[derive(Error, Debug)]
pub enum HubError {
    /// A component callback failed
    #[error("Component '{component}' failed during {phase}: {message}")]
    Component {
        component: String,
        phase: Phase,
        message: String,
        #[source]
        source: Option<Box<HubError>>,
    },

    /// An option required by a component has no value
    #[error("Missing required option: {0}")]
    MissingOption(String),

    /// An option value has the wrong shape
    #[error("Invalid value for option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    /// A header name or value could not be encoded
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The target URL could not be used
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport failed to deliver the request
    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    /// The hub answered with a non-success status
    #[error("Hub responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HubError {
    /// Wrap a transport-level error without altering it
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }

    /// Build a component error from anything printable
    pub fn component(component: impl Into<String>, phase: Phase, message: impl fmt::Display) -> Self {
        Self::Component {
            component: component.into(),
            phase,
            message: message.to_string(),
            source: None,
        }
    }

    /// Attach the failing component and phase to an error.
    ///
    /// Errors that already name a component are returned unchanged; anything
    /// else becomes the `source` of a new [`HubError::Component`].
    pub fn in_component(self, component: &str, phase: Phase) -> Self {
        match self {
            Self::Component { .. } => self,
            other => Self::Component {
                component: component.to_string(),
                phase,
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }

    /// The error a component raised, looking through the component annotation
    pub fn cause(&self) -> &HubError {
        match self {
            Self::Component {
                source: Some(inner),
                ..
            } => inner,
            _ => self,
        }
    }

    /// Check whether the failure happened on the wire rather than during composition
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    /// Get the HTTP status code if the hub answered with one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        HubError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for HubError {
    fn from(err: toml::de::Error) -> Self {
        HubError::Config(err.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for HubError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        HubError::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for HubError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        HubError::InvalidHeader(err.to_string())
    }
}
