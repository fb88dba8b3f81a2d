//! Subscription verification mode component

use crate::operation::is_subscription;
use crate::{Hub, HubComponent, HubError, OptionSet, ParameterSet, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Option selecting the verification mode
pub const VERIFY_OPTION: &str = "verify";

/// Option carrying the opaque verify token echoed back by the hub
pub const VERIFY_TOKEN_OPTION: &str = "verify_token";

/// How the hub should verify the subscriber's intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyMode {
    /// Verify before answering the subscription request
    #[default]
    Sync,
    /// Verify after answering the subscription request
    Async,
}

impl VerifyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }
}

impl fmt::Display for VerifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerifyMode {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sync" => Ok(Self::Sync),
            "async" => Ok(Self::Async),
            other => Err(HubError::InvalidOption {
                key: VERIFY_OPTION.to_string(),
                message: format!("unknown verify mode '{}'", other),
            }),
        }
    }
}

/// Sends `hub.verify` and, when set, `hub.verify_token` on subscription requests
#[derive(Debug, Clone, Default)]
pub struct VerifyComponent {
    mode: VerifyMode,
    token: Option<String>,
}

impl VerifyComponent {
    pub fn new(mode: VerifyMode) -> Self {
        Self { mode, token: None }
    }

    /// Default verify token for every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl HubComponent for VerifyComponent {
    fn name(&self) -> &str {
        "verify"
    }

    fn options(&self, _hub: &Hub, operation: &str) -> Result<OptionSet> {
        if !is_subscription(operation) {
            return Ok(OptionSet::new());
        }
        let token = self.token.clone().map(Value::String).unwrap_or(Value::Null);
        Ok(OptionSet::new()
            .with(VERIFY_OPTION, self.mode.as_str())
            .with(VERIFY_TOKEN_OPTION, token))
    }

    fn parameters(&self, _hub: &Hub, operation: &str, options: &OptionSet) -> Result<ParameterSet> {
        if !is_subscription(operation) {
            return Ok(ParameterSet::new());
        }

        let mode = match options.get_string(VERIFY_OPTION) {
            Some(value) => value.parse::<VerifyMode>()?,
            None => self.mode,
        };
        let mut params = ParameterSet::new().with("hub.verify", mode.as_str());

        if let Some(token) = options.get_string(VERIFY_TOKEN_OPTION)
            && !token.is_empty()
        {
            params.insert("hub.verify_token", token);
        }

        Ok(params)
    }
}
