//! HTTP basic authentication component

use crate::{Hub, HubComponent, OptionSet, RequestHandle, Result};
use base64::Engine;

/// Adds an `Authorization: Basic` header for hubs that require credentials
#[derive(Clone)]
pub struct BasicAuthComponent {
    username: String,
    password: Option<String>,
}

impl BasicAuthComponent {
    pub fn new(username: impl Into<String>, password: Option<impl Into<String>>) -> Self {
        Self {
            username: username.into(),
            password: password.map(Into::into),
        }
    }

    fn header_value(&self) -> String {
        let credentials = match &self.password {
            Some(p) => format!("{}:{}", self.username, p),
            None => format!("{}:", self.username),
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        format!("Basic {}", encoded)
    }
}

impl std::fmt::Debug for BasicAuthComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthComponent")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl HubComponent for BasicAuthComponent {
    fn name(&self) -> &str {
        "basic_auth"
    }

    fn modify_request(
        &self,
        _hub: &Hub,
        _operation: &str,
        _options: &OptionSet,
        request: &mut dyn RequestHandle,
    ) -> Result<()> {
        request.set_header("Authorization", &self.header_value())
    }
}
