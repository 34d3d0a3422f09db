use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use http::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::settings::Configuration;
use crate::error::{Error, Result};
use crate::helpers::time::{now, seconds_from_now};
use crate::locator::uri::ResourceLocator;
use crate::session::token::{call_login_server, Grant, TokenResponse};
use crate::utils::constants::AUTHORIZATION_SCHEME;

/// Access token, its expiry and the rotating refresh token.
/// Always replaced as a whole.
#[derive(Clone, PartialEq, Eq)]
struct Credentials {
    access_token: String,
    expires_at: DateTime<Utc>,
    refresh_token: String,
}

impl Credentials {
    fn from_response(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            expires_at: seconds_from_now(response.expires_in),
            refresh_token: response.refresh_token,
        }
    }

    fn expires_in_at(&self, at: DateTime<Utc>) -> Duration {
        self.expires_at - at
    }

    /// Inclusive: a token with zero time left is expired.
    fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.expires_in_at(at) <= Duration::zero()
    }
}

/// An authenticated session against the API.
///
/// Shared as `Arc<Session>` by every resource fetched through it. Reading
/// the token refreshes it first when expired; the credential triple sits
/// behind an async mutex so concurrent readers trigger a single refresh.
pub struct Session {
    configuration: Arc<Configuration>,
    locator: ResourceLocator,
    client: Client,
    credentials: Mutex<Credentials>,
}

impl Session {
    /// Exchange an authorization code (or the configured default) for a session.
    ///
    /// The configuration is validated before any request is made.
    pub async fn generate(configuration: Arc<Configuration>, authorization_code: Option<&str>) -> Result<Self> {
        Self::generate_with_client(configuration, authorization_code, Client::new()).await
    }

    pub async fn generate_with_client(
        configuration: Arc<Configuration>,
        authorization_code: Option<&str>,
        client: Client,
    ) -> Result<Self> {
        configuration.validate()?;
        let locator = ResourceLocator::new(configuration.api_base_uri())?;

        let code = authorization_code
            .or(configuration.default_authorization_code())
            .ok_or_else(|| Error::MissingSetting(vec!["default_authorization_code".to_owned()]))?;

        let grant = Grant::AuthorizationCode {
            client_id: configuration.client_id()?,
            redirect_uri: configuration.redirect_uri()?,
            code,
        };
        let response = call_login_server(&client, configuration.token_endpoint(), &grant).await?;
        let credentials = Credentials::from_response(response);
        info!("session generated; token expires at {}", credentials.expires_at);

        Ok(Self {
            configuration,
            locator,
            client,
            credentials: Mutex::new(credentials),
        })
    }

    /// Build a session from already known token values.
    pub fn from_parts(
        configuration: Arc<Configuration>,
        access_token: impl Into<String>,
        expires_in: Duration,
        refresh_token: impl Into<String>,
    ) -> Result<Self> {
        let locator = ResourceLocator::new(configuration.api_base_uri())?;
        Ok(Self {
            configuration,
            locator,
            client: Client::new(),
            credentials: Mutex::new(Credentials {
                access_token: access_token.into(),
                expires_at: now() + expires_in,
                refresh_token: refresh_token.into(),
            }),
        })
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    pub fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    /// The current bearer token, refreshed first if it has expired.
    pub async fn access_token(&self) -> Result<String> {
        let mut credentials = self.credentials.lock().await;
        if credentials.is_expired_at(now()) {
            debug!("access token expired at {}; refreshing", credentials.expires_at);
            self.refresh_locked(&mut credentials).await?;
        }
        Ok(credentials.access_token.clone())
    }

    /// String form of the session: its current bearer token.
    pub async fn bearer(&self) -> Result<String> {
        self.access_token().await
    }

    pub async fn authorization_header(&self) -> Result<String> {
        Ok(format!("{} {}", AUTHORIZATION_SCHEME, self.access_token().await?))
    }

    /// Exchange the refresh token for a new token pair. The old refresh
    /// token is unusable afterwards.
    pub async fn refresh(&self) -> Result<&Self> {
        let mut credentials = self.credentials.lock().await;
        self.refresh_locked(&mut credentials).await?;
        Ok(self)
    }

    async fn refresh_locked(&self, credentials: &mut Credentials) -> Result<()> {
        let grant = Grant::RefreshToken {
            client_id: self.configuration.client_id()?,
            refresh_token: &credentials.refresh_token,
        };
        let response = call_login_server(&self.client, self.configuration.token_endpoint(), &grant).await?;

        *credentials = Credentials::from_response(response);
        info!("session refreshed; token expires at {}", credentials.expires_at);
        Ok(())
    }

    pub async fn refresh_token(&self) -> String {
        self.credentials.lock().await.refresh_token.clone()
    }

    pub async fn expires_at(&self) -> DateTime<Utc> {
        self.credentials.lock().await.expires_at
    }

    /// Signed time left on the access token; negative once expired.
    pub async fn expires_in(&self) -> Duration {
        self.credentials.lock().await.expires_in_at(now())
    }

    pub async fn is_expired(&self) -> bool {
        self.credentials.lock().await.is_expired_at(now())
    }

    /// Authorized GET of `path_or_uri` with the given `Accept` media type.
    pub async fn get(&self, path_or_uri: &str, accept: &str) -> Result<Response> {
        let uri = self.locator.expand_uri(path_or_uri);
        let authorization = self.authorization_header().await?;

        debug!("GET {} accept={}", uri, accept);
        let response = self
            .client
            .get(&uri)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, accept)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::RequestFailed {
                uri,
                status: response.status(),
            });
        }
        Ok(response)
    }

    pub async fn get_text(&self, path_or_uri: &str, accept: &str) -> Result<String> {
        Ok(self.get(path_or_uri, accept).await?.text().await?)
    }

    pub async fn get_bytes(&self, path_or_uri: &str, accept: &str) -> Result<Vec<u8>> {
        Ok(self.get(path_or_uri, accept).await?.bytes().await?.to_vec())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token_endpoint", &self.configuration.token_endpoint())
            .field("authority", &self.locator.authority())
            .finish_non_exhaustive()
    }
}
