//! Cache data models.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

/// Identity of a request inside a cache generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    /// Upper-case HTTP method.
    pub method: String,
    /// Request URL, absolute or origin-relative.
    pub url: String,
}

impl RequestKey {
    /// Creates a key, normalising the method to upper case.
    #[must_use]
    pub fn new(method: &str, url: impl Into<String>) -> Self {
        Self {
            method: method.trim().to_ascii_uppercase(),
            url: url.into(),
        }
    }

    /// Creates a `GET` key.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Only `GET` responses are stored.
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        self.method == "GET"
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// A response as seen by the page, or as stored in a generation.
///
/// Cloning shares the body buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Final URL the response came from.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response headers in arrival order.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Bytes,
}

impl Resource {
    /// Creates a resource with no headers.
    #[must_use]
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Status in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// First header with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Lifecycle of a cache generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Nothing installed for this generation name.
    #[default]
    Uninstalled,
    /// Manifest is being fetched.
    Installing,
    /// Installed; an older generation may still be serving.
    Waiting,
    /// Intercepting requests.
    Active,
}

impl LifecycleState {
    /// Stable storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninstalled => "uninstalled",
            Self::Installing => "installing",
            Self::Waiting => "waiting",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uninstalled" => Ok(Self::Uninstalled),
            "installing" => Ok(Self::Installing),
            "waiting" => Ok(Self::Waiting),
            "active" => Ok(Self::Active),
            other => Err(format!("unknown lifecycle state: {other}")),
        }
    }
}

/// One stored generation, for maintenance listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Generation name.
    pub name: String,
    /// Stored lifecycle state.
    pub state: LifecycleState,
    /// Number of stored responses.
    pub entries: u64,
}
