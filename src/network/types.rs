use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// HTTP methods curl may send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
        }
    }

    /// Methods whose requests never carry a body
    pub fn is_bodyless(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options)
    }
}

impl FromStr for HttpMethod {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(NetworkError::InvalidMethod { method: s.to_string() }),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Request timeout in ms (default: 30000)
    pub timeout_ms: u64,
    /// Max redirects followed (default: 20)
    pub max_redirects: usize,
    /// Sent as `User-Agent` unless the request sets its own
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_redirects: 20,
            user_agent: concat!("vfs-shell/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Network error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("invalid HTTP method '{method}'")]
    InvalidMethod { method: String },

    /// HTTP client could not be built
    #[error("HTTP client error: {message}")]
    Client { message: String },

    /// Request failed before a response arrived
    #[error("request failed: {message}")]
    Request { message: String },
}
