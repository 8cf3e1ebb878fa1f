//! Client and session configuration.

use std::time::Duration;

use crate::credentials::Credentials;
use crate::error::{Error, ErrorKind, Result};
use crate::{MAIN_INSTANCE_URL, SANDBOX_INSTANCE_URL};

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Accept gzip/deflate compressed responses.
    pub accept_compressed: bool,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: crate::USER_AGENT.to_string(),
            accept_compressed: true,
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Accept compressed responses.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// The Fluidinfo instance a session talks to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Instance {
    /// `https://fluiddb.fluidinfo.com/`
    #[default]
    Main,
    /// `https://sandbox.fluidinfo.com/`
    Sandbox,
    /// A bespoke instance. Must start with `http://` or `https://` and end
    /// with `/`.
    Custom(String),
}

impl Instance {
    /// Parse an instance name or URL.
    ///
    /// `"main"` and `"sandbox"` are matched case-insensitively; anything else
    /// must be a valid bespoke instance URL.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "main" => Ok(Instance::Main),
            "sandbox" => Ok(Instance::Sandbox),
            _ => Instance::custom(value),
        }
    }

    /// A validated bespoke instance.
    pub fn custom(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        validate_base_url(&url)?;
        Ok(Instance::Custom(url))
    }

    /// The base URL, always ending with `/`.
    pub fn base_url(&self) -> &str {
        match self {
            Instance::Main => MAIN_INSTANCE_URL,
            Instance::Sandbox => SANDBOX_INSTANCE_URL,
            Instance::Custom(url) => url,
        }
    }
}

pub(crate) fn validate_base_url(url: &str) -> Result<()> {
    let pattern = regex_lite::Regex::new(r"^(http|https)://.+/$")
        .map_err(|e| Error::new(ErrorKind::Config(e.to_string())))?;
    if !pattern.is_match(url) {
        return Err(Error::value(
            "The URL must start with http[s]:// and have a trailing slash ('/') to be valid. E.g. https://localhost/",
        ));
    }
    url::Url::parse(url)?;
    Ok(())
}

/// Everything needed to open a [`Session`](crate::Session).
///
/// Basic credentials and an OAuth2 access token may both be set; with
/// neither the session is anonymous.
#[derive(Clone, Default)]
pub struct SessionConfig {
    pub instance: Instance,
    pub credentials: Option<Credentials>,
    pub access_token: Option<String>,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("instance", &self.instance)
            .field("credentials", &self.credentials)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl SessionConfig {
    /// Create a new session config builder.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Anonymous session against the given instance.
    pub fn anonymous(instance: Instance) -> Self {
        Self {
            instance,
            ..Self::default()
        }
    }

    /// Load session settings from environment variables.
    ///
    /// All variables are optional:
    /// - `FLUIDINFO_INSTANCE`: `main`, `sandbox` or a bespoke URL
    /// - `FLUIDINFO_USERNAME` and `FLUIDINFO_PASSWORD` (used only together)
    /// - `FLUIDINFO_ACCESS_TOKEN`
    pub fn from_env() -> Result<Self> {
        let instance = match std::env::var("FLUIDINFO_INSTANCE") {
            Ok(value) if !value.is_empty() => Instance::parse(&value)?,
            _ => Instance::Main,
        };

        let credentials = match (
            std::env::var("FLUIDINFO_USERNAME"),
            std::env::var("FLUIDINFO_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) => Some(Credentials::new(username, password)),
            _ => None,
        };

        let access_token = std::env::var("FLUIDINFO_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        Ok(Self {
            instance,
            credentials,
            access_token,
        })
    }
}

/// Builder for SessionConfig.
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the instance.
    pub fn instance(mut self, instance: Instance) -> Self {
        self.config.instance = instance;
        self
    }

    /// Set the instance from a name or URL, see [`Instance::parse`].
    pub fn instance_name(mut self, value: &str) -> Result<Self> {
        self.config.instance = Instance::parse(value)?;
        Ok(self)
    }

    /// Sign in with a username and password.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Use an OAuth2 access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = Some(token.into());
        self
    }

    /// Build the session configuration.
    pub fn build(self) -> SessionConfig {
        self.config
    }
}
