//! Process-wide default session.
//!
//! Engine calls always take a session explicitly; this holder only
//! supplies one at call sites that choose not to pass their own.

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::config::settings::Configuration;
use crate::error::{Error, Result};
use crate::session::session::Session;

lazy_static::lazy_static! {
    static ref DEFAULT_SESSION: RwLock<Option<Arc<Session>>> = RwLock::new(None);
}

pub fn set_default_session(session: Arc<Session>) {
    let mut slot = DEFAULT_SESSION.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(session);
}

pub fn default_session() -> Result<Arc<Session>> {
    DEFAULT_SESSION
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
        .ok_or(Error::NoDefaultSession)
}

pub fn clear_default_session() {
    DEFAULT_SESSION.write().unwrap_or_else(|e| e.into_inner()).take();
}

/// Generate a session and install it as the default.
pub async fn authenticate(configuration: Arc<Configuration>, authorization_code: Option<&str>) -> Result<Arc<Session>> {
    let session = Arc::new(Session::generate(configuration, authorization_code).await?);
    set_default_session(session.clone());
    info!("default session installed");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial(default_session)]
    fn missing_default_session_is_an_error() {
        clear_default_session();
        assert!(matches!(default_session(), Err(Error::NoDefaultSession)));
    }

    #[test]
    #[serial(default_session)]
    fn set_then_get_returns_same_session() {
        let configuration = Arc::new(Configuration::new("1234", "zoo.net"));
        let session = Arc::new(Session::from_parts(configuration, "5b", Duration::seconds(60), "p8").unwrap());
        set_default_session(session.clone());

        assert!(Arc::ptr_eq(&default_session().unwrap(), &session));
        clear_default_session();
    }
}
