//! Shared constants and invariants

pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://login.huddle.net/token";
pub const DEFAULT_API_BASE_URI: &str = "https://api.huddle.net";

/// `Accept` value for every resource document.
pub const DEFAULT_MEDIA_TYPE: &str = "application/vnd.huddle.data+xml";
/// Scheme used in the `Authorization` header of resource requests.
pub const AUTHORIZATION_SCHEME: &str = "OAuth2";

// Supported grant types
pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";
pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";

pub const UNKNOWN_LOGIN_ERROR: &str = "Unknown Error";

pub const SELF_RELATION: &str = "self";
