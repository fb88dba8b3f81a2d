//! Topic URL component

use crate::operation::{PUBLISH, is_subscription};
use crate::{Hub, HubComponent, OptionSet, ParameterSet, Result};
use serde_json::Value;

/// Option naming the topic URL
pub const TOPIC_OPTION: &str = "topic";

/// Sends the topic URL: `hub.topic` when (un)subscribing, `hub.url` when
/// publishing. Fails with a missing option error if no topic was given.
#[derive(Debug, Clone, Default)]
pub struct TopicComponent;

impl TopicComponent {
    pub fn new() -> Self {
        Self
    }

    fn parameter_name(operation: &str) -> Option<&'static str> {
        if is_subscription(operation) {
            Some("hub.topic")
        } else if operation == PUBLISH {
            Some("hub.url")
        } else {
            None
        }
    }
}

impl HubComponent for TopicComponent {
    fn name(&self) -> &str {
        "topic"
    }

    fn options(&self, _hub: &Hub, operation: &str) -> Result<OptionSet> {
        if Self::parameter_name(operation).is_none() {
            return Ok(OptionSet::new());
        }
        Ok(OptionSet::new().with(TOPIC_OPTION, Value::Null))
    }

    fn parameters(&self, _hub: &Hub, operation: &str, options: &OptionSet) -> Result<ParameterSet> {
        let Some(name) = Self::parameter_name(operation) else {
            return Ok(ParameterSet::new());
        };

        let topic = options.require_string(TOPIC_OPTION)?;
        Ok(ParameterSet::new().with(name, topic))
    }
}
