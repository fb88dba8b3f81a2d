//! Static request header component

use crate::{Hub, HubComponent, OptionSet, RequestHandle, Result};

/// Sets fixed headers on every hub request.
///
/// Headers are applied in insertion order, replacing earlier values for the
/// same name (including values set by components registered before this one).
#[derive(Debug, Clone, Default)]
pub struct HeaderComponent {
    headers: Vec<(String, String)>,
}

impl HeaderComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the `User-Agent` header
    pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
        self.header("User-Agent", user_agent)
    }

    /// Configured headers
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl HubComponent for HeaderComponent {
    fn name(&self) -> &str {
        "headers"
    }

    fn modify_request(
        &self,
        _hub: &Hub,
        _operation: &str,
        _options: &OptionSet,
        request: &mut dyn RequestHandle,
    ) -> Result<()> {
        for (name, value) in &self.headers {
            request.set_header(name, value)?;
        }
        Ok(())
    }
}
