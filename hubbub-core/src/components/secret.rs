//! Content distribution secret component

use crate::operation::SUBSCRIBE;
use crate::{Hub, HubComponent, HubError, OptionSet, ParameterSet, Result};
use serde_json::Value;

/// Option carrying the subscriber secret
pub const SECRET_OPTION: &str = "secret";

/// Hubs reject secrets of this many bytes or more
pub const MAX_SECRET_BYTES: usize = 200;

/// Sends `hub.secret` on subscribe requests when a secret is set.
///
/// The hub uses the secret to sign content it later delivers; computing and
/// checking those signatures is the subscriber's business, not this crate's.
#[derive(Clone, Default)]
pub struct SecretComponent {
    secret: Option<String>,
}

impl SecretComponent {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
        }
    }

    /// Only send a secret when the caller passes one
    pub fn per_request() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for SecretComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretComponent")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HubComponent for SecretComponent {
    fn name(&self) -> &str {
        "secret"
    }

    fn options(&self, _hub: &Hub, operation: &str) -> Result<OptionSet> {
        if operation != SUBSCRIBE {
            return Ok(OptionSet::new());
        }
        let default = self.secret.clone().map(Value::String).unwrap_or(Value::Null);
        Ok(OptionSet::new().with(SECRET_OPTION, default))
    }

    fn parameters(&self, _hub: &Hub, operation: &str, options: &OptionSet) -> Result<ParameterSet> {
        if operation != SUBSCRIBE {
            return Ok(ParameterSet::new());
        }

        let Some(secret) = options.get_string(SECRET_OPTION).filter(|s| !s.is_empty()) else {
            return Ok(ParameterSet::new());
        };

        if secret.len() >= MAX_SECRET_BYTES {
            return Err(HubError::InvalidOption {
                key: SECRET_OPTION.to_string(),
                message: format!(
                    "secret is {} bytes, must be under {}",
                    secret.len(),
                    MAX_SECRET_BYTES
                ),
            });
        }

        Ok(ParameterSet::new().with("hub.secret", secret))
    }
}
