//! Protocol operation tokens and reserved wire parameters
//!
//! Operations are plain string tokens. The hub never interprets them beyond
//! sending them as the `hub.mode` body field, so custom tokens pass through
//! untouched to components.

/// Subscribe a callback to a topic
pub const SUBSCRIBE: &str = "subscribe";

/// Remove a callback's subscription to a topic
pub const UNSUBSCRIBE: &str = "unsubscribe";

/// Notify the hub that a topic has new content
pub const PUBLISH: &str = "publish";

/// Body field carrying the operation token in every hub request
pub const MODE_PARAMETER: &str = "hub.mode";

/// Check whether an operation manages a subscription
pub fn is_subscription(operation: &str) -> bool {
    operation == SUBSCRIBE || operation == UNSUBSCRIBE
}
