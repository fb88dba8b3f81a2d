//! Hub configuration
//!
//! A [`HubConfig`] describes one hub endpoint and the settings of the
//! standard components. It can be built in code, parsed from TOML, or read
//! from prefixed environment variables, and turned into a ready [`Hub`].

use crate::components::{
    BasicAuthComponent, CallbackComponent, HeaderComponent, LeaseComponent, MAX_SECRET_BYTES,
    SecretComponent, TopicComponent, VerifyComponent, VerifyMode,
};
use crate::{Hub, HubError, RequestHandleFactory, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default environment variable prefix
pub const DEFAULT_ENV_PREFIX: &str = "HUBBUB";

/// Configuration for a hub and its standard components
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Hub endpoint URL
    pub url: String,

    /// Default subscriber callback URL
    pub callback: Option<String>,

    /// Verification mode requested from the hub
    pub verify: VerifyMode,

    /// Default verify token
    pub verify_token: Option<String>,

    /// Default lease in seconds; the hub decides when unset
    pub lease_seconds: Option<u64>,

    /// Default content distribution secret
    #[serde(skip_serializing)]
    pub secret: Option<String>,

    /// User-Agent header for hub requests
    pub user_agent: String,

    /// Basic auth username
    pub username: Option<String>,

    /// Basic auth password
    #[serde(skip_serializing)]
    pub password: Option<String>,

    /// Extra headers for every request
    pub headers: BTreeMap<String, String>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            callback: None,
            verify: VerifyMode::Sync,
            verify_token: None,
            lease_seconds: None,
            secret: None,
            user_agent: format!("Hubbub/{}", env!("CARGO_PKG_VERSION")),
            username: None,
            password: None,
            headers: BTreeMap::new(),
        }
    }
}

impl std::fmt::Debug for HubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubConfig")
            .field("url", &self.url)
            .field("callback", &self.callback)
            .field("verify", &self.verify)
            .field("lease_seconds", &self.lease_seconds)
            .field("user_agent", &self.user_agent)
            .field("username", &self.username)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl HubConfig {
    /// Create a configuration for the hub at `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Create a builder for custom configuration
    pub fn builder(url: impl Into<String>) -> HubConfigBuilder {
        HubConfigBuilder::new(url)
    }

    /// Parse a configuration from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: HubConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| HubError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Read configuration from `HUBBUB_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Read configuration from environment variables starting with `prefix`
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        Self::from_vars(prefix, std::env::vars())
    }

    /// Read configuration from `(name, value)` pairs, keeping names that
    /// start with `prefix`.
    ///
    /// Recognized keys (after the prefix and `_`, case-insensitive): `URL`,
    /// `CALLBACK`, `VERIFY`, `VERIFY_TOKEN`, `LEASE_SECONDS`, `SECRET`,
    /// `USER_AGENT`, `USERNAME`, `PASSWORD`, and `HEADER_<NAME>` for extra
    /// headers (underscores in `<NAME>` become dashes).
    pub fn from_vars<I, K, V>(prefix: &str, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let prefix = format!("{}_", prefix.to_uppercase());
        let mut config = HubConfig::default();

        for (key, value) in vars {
            let Some(key) = key.as_ref().to_uppercase().strip_prefix(&prefix).map(str::to_string)
            else {
                continue;
            };
            let value: String = value.into();

            match key.as_str() {
                "URL" => config.url = value,
                "CALLBACK" => config.callback = Some(value),
                "VERIFY" => config.verify = value.parse()?,
                "VERIFY_TOKEN" => config.verify_token = Some(value),
                "LEASE_SECONDS" => {
                    let seconds = value.trim().parse::<u64>().map_err(|e| {
                        HubError::Config(format!("{}LEASE_SECONDS: {}", prefix, e))
                    })?;
                    config.lease_seconds = Some(seconds);
                }
                "SECRET" => config.secret = Some(value),
                "USER_AGENT" => config.user_agent = value,
                "USERNAME" => config.username = Some(value),
                "PASSWORD" => config.password = Some(value),
                other => {
                    if let Some(name) = other.strip_prefix("HEADER_") {
                        config.headers.insert(name.replace('_', "-"), value);
                    }
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce a hub
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(HubError::Config("hub url is required".to_string()));
        }
        if self.password.is_some() && self.username.is_none() {
            return Err(HubError::Config(
                "password given without a username".to_string(),
            ));
        }
        if self.lease_seconds == Some(0) {
            return Err(HubError::Config(
                "lease_seconds must be at least one second".to_string(),
            ));
        }
        if let Some(secret) = &self.secret
            && secret.len() >= MAX_SECRET_BYTES
        {
            return Err(HubError::Config(format!(
                "secret is {} bytes, must be under {}",
                secret.len(),
                MAX_SECRET_BYTES
            )));
        }
        Ok(())
    }

    /// Build a hub with the standard components in protocol order:
    /// topic, callback, verify, lease, secret, headers, then basic auth.
    pub fn build_hub<F>(&self, factory: F) -> Result<Hub>
    where
        F: RequestHandleFactory + 'static,
    {
        self.validate()?;

        let callback = match &self.callback {
            Some(url) => CallbackComponent::new(url.clone()),
            None => CallbackComponent::per_request(),
        };

        let mut verify = VerifyComponent::new(self.verify);
        if let Some(token) = &self.verify_token {
            verify = verify.with_token(token.clone());
        }

        let lease = match self.lease_seconds {
            Some(seconds) => LeaseComponent::new(seconds),
            None => LeaseComponent::hub_default(),
        };

        let secret = match &self.secret {
            Some(secret) => SecretComponent::new(secret.clone()),
            None => SecretComponent::per_request(),
        };

        let mut headers = HeaderComponent::new().user_agent(self.user_agent.clone());
        for (name, value) in &self.headers {
            headers = headers.header(name.clone(), value.clone());
        }

        let mut builder = Hub::builder(self.url.clone(), factory)
            .component(TopicComponent::new())
            .component(callback)
            .component(verify)
            .component(lease)
            .component(secret)
            .component(headers);

        if let Some(username) = &self.username {
            builder = builder.component(BasicAuthComponent::new(
                username.clone(),
                self.password.clone(),
            ));
        }

        Ok(builder.build())
    }
}

/// Builder for HubConfig
#[derive(Debug, Clone)]
pub struct HubConfigBuilder {
    config: HubConfig,
}

impl HubConfigBuilder {
    /// Create a new builder with default settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            config: HubConfig::new(url),
        }
    }

    /// Set the default callback URL
    pub fn callback(mut self, callback: impl Into<String>) -> Self {
        self.config.callback = Some(callback.into());
        self
    }

    /// Set the verification mode
    pub fn verify(mut self, mode: VerifyMode) -> Self {
        self.config.verify = mode;
        self
    }

    /// Set the default verify token
    pub fn verify_token(mut self, token: impl Into<String>) -> Self {
        self.config.verify_token = Some(token.into());
        self
    }

    /// Set the default lease
    pub fn lease_seconds(mut self, seconds: u64) -> Self {
        self.config.lease_seconds = Some(seconds);
        self
    }

    /// Set the default secret
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = Some(secret.into());
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Authenticate with HTTP basic auth
    pub fn basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.config.username = Some(username.into());
        self.config.password = password;
        self
    }

    /// Add an extra header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(name.into(), value.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> HubConfig {
        self.config
    }
}
