use reqwest::Url;

use crate::error::{Error, Result};

/// Expands authority-relative paths against the API's base authority.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    authority: String,
}

impl ResourceLocator {
    /// Only the scheme, host and port of `base` are kept.
    pub fn new(base: &str) -> Result<Self> {
        let url = Url::parse(base).map_err(|e| Error::InvalidUri {
            uri: base.to_owned(),
            reason: e.to_string(),
        })?;
        if !url.has_host() {
            return Err(Error::InvalidUri {
                uri: base.to_owned(),
                reason: "base uri has no host".to_owned(),
            });
        }
        Ok(Self {
            authority: url.origin().ascii_serialization(),
        })
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Absolute URIs pass through untouched; anything else is a path on
    /// the base authority, with a leading `/` inserted when missing.
    pub fn expand_uri(&self, path_or_uri: &str) -> String {
        if let Ok(url) = Url::parse(path_or_uri) {
            if url.has_host() {
                return path_or_uri.to_owned();
            }
        }

        if path_or_uri.starts_with('/') {
            format!("{}{}", self.authority, path_or_uri)
        } else {
            format!("{}/{}", self.authority, path_or_uri)
        }
    }
}
