//! Subscriber callback component

use crate::operation::is_subscription;
use crate::{Hub, HubComponent, OptionSet, ParameterSet, Result};
use serde_json::Value;

/// Option naming the subscriber callback URL
pub const CALLBACK_OPTION: &str = "callback";

/// Sends `hub.callback` on subscribe and unsubscribe requests.
///
/// The configured callback URL is the default; callers can pass a different
/// `callback` option per request.
#[derive(Debug, Clone, Default)]
pub struct CallbackComponent {
    callback: Option<String>,
}

impl CallbackComponent {
    /// Use `callback` unless the caller overrides it
    pub fn new(callback: impl Into<String>) -> Self {
        Self {
            callback: Some(callback.into()),
        }
    }

    /// Require every caller to pass a `callback` option
    pub fn per_request() -> Self {
        Self { callback: None }
    }
}

impl HubComponent for CallbackComponent {
    fn name(&self) -> &str {
        "callback"
    }

    fn options(&self, _hub: &Hub, operation: &str) -> Result<OptionSet> {
        if !is_subscription(operation) {
            return Ok(OptionSet::new());
        }
        let default = self.callback.clone().map(Value::String).unwrap_or(Value::Null);
        Ok(OptionSet::new().with(CALLBACK_OPTION, default))
    }

    fn parameters(&self, _hub: &Hub, operation: &str, options: &OptionSet) -> Result<ParameterSet> {
        if !is_subscription(operation) {
            return Ok(ParameterSet::new());
        }
        let callback = options.require_string(CALLBACK_OPTION)?;
        Ok(ParameterSet::new().with("hub.callback", callback))
    }
}
