//! Transport configuration.

use std::time::Duration;

/// Configuration for reqwest-backed request handles.
#[derive(Debug, Clone)]
pub struct HttpHandleConfig {
    /// Total request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent string, used unless a component sets `User-Agent`.
    pub user_agent: String,
    /// Follow redirects.
    pub follow_redirects: bool,
    /// Maximum redirects to follow.
    pub max_redirects: usize,
    /// Whether to verify TLS certificates.
    pub verify_ssl: bool,
    /// Headers added to every request before components run.
    pub default_headers: Vec<(String, String)>,
    /// Treat non-2xx responses as errors.
    pub error_for_status: bool,
}

impl Default for HttpHandleConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("hubbub-http/{}", env!("CARGO_PKG_VERSION")),
            follow_redirects: true,
            max_redirects: 10,
            verify_ssl: true,
            default_headers: Vec::new(),
            error_for_status: true,
        }
    }
}

impl HttpHandleConfig {
    /// Create a new configuration builder.
    pub fn builder() -> HttpHandleConfigBuilder {
        HttpHandleConfigBuilder::default()
    }
}

/// Builder for transport configuration.
#[derive(Debug, Default)]
pub struct HttpHandleConfigBuilder {
    config: HttpHandleConfig,
}

impl HttpHandleConfigBuilder {
    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable following redirects.
    pub fn follow_redirects(mut self, enable: bool) -> Self {
        self.config.follow_redirects = enable;
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Set TLS certificate verification.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.config.verify_ssl = verify;
        self
    }

    /// Add a default header for all requests.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((name.into(), value.into()));
        self
    }

    /// Return non-2xx responses as responses instead of errors.
    pub fn allow_error_status(mut self) -> Self {
        self.config.error_for_status = false;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HttpHandleConfig {
        self.config
    }
}
