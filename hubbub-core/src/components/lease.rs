//! Subscription lease component

use crate::operation::SUBSCRIBE;
use crate::{Hub, HubComponent, HubError, OptionSet, ParameterSet, Result};
use serde_json::Value;

/// Option carrying the requested lease length in seconds
pub const LEASE_OPTION: &str = "lease_seconds";

/// Sends `hub.lease_seconds` on subscribe requests when a lease is set
#[derive(Debug, Clone, Default)]
pub struct LeaseComponent {
    lease_seconds: Option<u64>,
}

impl LeaseComponent {
    /// Request `seconds` by default
    pub fn new(seconds: u64) -> Self {
        Self {
            lease_seconds: Some(seconds),
        }
    }

    /// Let the hub pick the lease unless the caller asks for one
    pub fn hub_default() -> Self {
        Self::default()
    }
}

impl HubComponent for LeaseComponent {
    fn name(&self) -> &str {
        "lease"
    }

    fn options(&self, _hub: &Hub, operation: &str) -> Result<OptionSet> {
        if operation != SUBSCRIBE {
            return Ok(OptionSet::new());
        }
        let default = self.lease_seconds.map(Value::from).unwrap_or(Value::Null);
        Ok(OptionSet::new().with(LEASE_OPTION, default))
    }

    fn parameters(&self, _hub: &Hub, operation: &str, options: &OptionSet) -> Result<ParameterSet> {
        if operation != SUBSCRIBE {
            return Ok(ParameterSet::new());
        }

        match options.get_u64(LEASE_OPTION)? {
            Some(0) => Err(HubError::InvalidOption {
                key: LEASE_OPTION.to_string(),
                message: "lease must be at least one second".to_string(),
            }),
            Some(seconds) => Ok(ParameterSet::new().with("hub.lease_seconds", seconds.to_string())),
            None => Ok(ParameterSet::new()),
        }
    }
}
