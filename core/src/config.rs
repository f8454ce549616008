//! Client configuration: server location and Basic-auth credentials.

use std::fmt;

use serde::Deserialize;

/// Path appended to the server root to reach API v2.
pub const API_PREFIX: &str = "index.php?/api/v2/";

/// User name and password (or API key) sent with every request.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
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
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Where the TestRail instance lives and who to authenticate as.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default)]
    pub credentials: Credentials,
}

impl ClientConfig {
    /// Configuration with empty credentials; set them with
    /// [`ClientConfig::with_credentials`] before talking to a real server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: Credentials::default(),
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials::new(user, password);
        self
    }

    /// The base URL with exactly one trailing `/`, followed by the API prefix.
    pub fn api_root(&self) -> String {
        format!("{}/{API_PREFIX}", self.base_url.trim_end_matches('/'))
    }
}
