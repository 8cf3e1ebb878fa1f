//! Credentials and Authorization header selection.
//!
//! All credential types implement custom Debug to redact sensitive data.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::ACCESS_TOKEN_HEADER;

/// Username and password for HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Create new Basic credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Get the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Base64 of the UTF-8 bytes of `username:password`, standard alphabet
    /// with padding.
    pub fn basic_token(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.username, self.password))
    }
}

/// The authentication scheme used for one request.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// No Authorization header.
    Anonymous,
    /// `Authorization: basic <token>`.
    Basic { token: String },
    /// `Authorization: oauth2[ <consumer>]` plus the access token header.
    /// The optional consumer is a Basic token identifying the caller.
    OAuth2 {
        access_token: String,
        consumer: Option<String>,
    },
}

impl std::fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScheme::Anonymous => f.write_str("Anonymous"),
            AuthScheme::Basic { .. } => f.debug_struct("Basic").field("token", &"[REDACTED]").finish(),
            AuthScheme::OAuth2 { consumer, .. } => f
                .debug_struct("OAuth2")
                .field("access_token", &"[REDACTED]")
                .field("consumer", &consumer.as_ref().map(|_| "[REDACTED]"))
                .finish(),
        }
    }
}

impl AuthScheme {
    /// Pick the scheme for a request.
    ///
    /// Precedence: per-call credentials, then the session's OAuth2 token
    /// (with its Basic credentials as consumer when configured), then the
    /// session's Basic credentials, then anonymous.
    pub fn select(
        call_override: Option<&Credentials>,
        basic_token: Option<&str>,
        access_token: Option<&str>,
    ) -> Self {
        if let Some(credentials) = call_override {
            return AuthScheme::Basic {
                token: credentials.basic_token(),
            };
        }
        match (access_token, basic_token) {
            (Some(access_token), consumer) => AuthScheme::OAuth2 {
                access_token: access_token.to_string(),
                consumer: consumer.map(str::to_string),
            },
            (None, Some(token)) => AuthScheme::Basic {
                token: token.to_string(),
            },
            (None, None) => AuthScheme::Anonymous,
        }
    }

    /// Headers this scheme adds to a request.
    pub fn headers(&self) -> Vec<(String, String)> {
        match self {
            AuthScheme::Anonymous => Vec::new(),
            AuthScheme::Basic { token } => {
                vec![("Authorization".to_string(), format!("basic {}", token))]
            }
            AuthScheme::OAuth2 {
                access_token,
                consumer,
            } => {
                let authorization = match consumer {
                    Some(token) => format!("oauth2 {}", token),
                    None => "oauth2".to_string(),
                };
                vec![
                    (ACCESS_TOKEN_HEADER.to_string(), access_token.clone()),
                    ("Authorization".to_string(), authorization),
                ]
            }
        }
    }
}

/// Authorization headers for a request, following [`AuthScheme::select`].
pub fn authorization_headers(
    call_override: Option<&Credentials>,
    basic_token: Option<&str>,
    access_token: Option<&str>,
) -> Vec<(String, String)> {
    AuthScheme::select(call_override, basic_token, access_token).headers()
}
