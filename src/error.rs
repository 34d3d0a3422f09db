use thiserror::Error;

/// Errors raised by the session lifecycle and the resource engine.
///
/// `MissingSetting`, `Login` and `LinkNotFound` are the caller-facing
/// failures; the rest describe transport and document problems.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more required configuration settings are unset.
    #[error("undefined settings: {}", .0.join(", "))]
    MissingSetting(Vec<String>),

    /// The authorization server rejected a code or refresh-token exchange.
    #[error("{0}")]
    Login(String),

    /// The requested link relation is absent from the current document.
    #[error("link relation '{0}' not found")]
    LinkNotFound(String),

    #[error("unresolved placeholders {names:?} in path template '{template}'")]
    UnresolvedPlaceholder { template: String, names: Vec<String> },

    #[error("invalid uri '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("request to {uri} failed: {status}")]
    RequestFailed { uri: String, status: http::StatusCode },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("expected root element <{expected}> but found <{found}>")]
    UnexpectedRoot { expected: String, found: String },

    #[error("resource has no self link")]
    MissingSelfLink,

    /// A cached association was requested as a different resource type.
    #[error("association '{0}' holds a different resource type")]
    AssociationType(String),

    #[error("no default session; authenticate first")]
    NoDefaultSession,

    #[error("invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("invalid timestamp '{value}' in <{element}>")]
    InvalidTimestamp { element: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}
