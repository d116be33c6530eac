//! Endpoint target and HTTP authentication.

use crate::error::{Result, StepsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// How requests to the endpoint are authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    None,
    Basic,
    Digest,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::Digest => "digest",
        }
    }
}

impl FromStr for AuthMode {
    type Err = StepsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "basic" => Ok(Self::Basic),
            "digest" => Ok(Self::Digest),
            _ => Err(StepsError::config(format!(
                "Invalid auth mode: {s}. Expected: none, basic, or digest"
            ))),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User and password for the endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// The endpoint a client talks to. Fixed for the lifetime of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTarget {
    url: Url,
    credentials: Option<Credentials>,
    auth: Option<AuthMode>,
}

impl EndpointTarget {
    /// Creates an anonymous target.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            credentials: None,
            auth: None,
        }
    }

    /// Parses the endpoint URL and creates an anonymous target.
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| StepsError::config(format!("Invalid endpoint URL '{url}': {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(Self::new(url)),
            other => Err(StepsError::config(format!(
                "Invalid scheme '{other}'. Expected 'http' or 'https'"
            ))),
        }
    }

    /// Sets the credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Requests an explicit auth mode.
    pub fn with_auth(mut self, auth: AuthMode) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// The auth mode actually used.
    ///
    /// Without credentials nothing is sent. With credentials, digest unless
    /// another mode was asked for.
    pub fn effective_auth(&self) -> AuthMode {
        match (&self.credentials, self.auth) {
            (None, _) => AuthMode::None,
            (Some(_), None) => AuthMode::Digest,
            (Some(_), Some(mode)) => mode,
        }
    }
}

/// Answers a `WWW-Authenticate: Digest` challenge for a GET of `uri`.
///
/// `uri` is the request target as it appears on the request line (path and query).
pub fn digest_response(challenge: &str, credentials: &Credentials, uri: &str) -> Result<String> {
    let mut prompt = digest_auth::parse(challenge)
        .map_err(|e| StepsError::request(format!("Invalid digest challenge: {e}")))?;
    let context = digest_auth::AuthContext::new(
        credentials.user.as_str(),
        credentials.password.as_str(),
        uri,
    );
    let answer = prompt
        .respond(&context)
        .map_err(|e| StepsError::request(format!("Cannot answer digest challenge: {e}")))?;
    Ok(answer.to_header_string())
}

/// Returns true if a `WWW-Authenticate` value offers digest authentication.
pub fn is_digest_challenge(header: &str) -> bool {
    header
        .trim_start()
        .get(..6)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("digest"))
}
