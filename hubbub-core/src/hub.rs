//! The hub: composes and fires one request per operation

use crate::components::TOPIC_OPTION;
use crate::error::Phase;
use crate::operation::{self, MODE_PARAMETER};
use crate::{
    HubComponent, HubResponse, OptionSet, ParameterAggregator, RequestHandle,
    RequestHandleFactory, Result,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Orchestrates hub requests across an ordered list of components.
///
/// The target URL and component list are fixed at construction. A hub keeps
/// no state between calls and can be reused (and shared behind an `Arc`)
/// for any number of requests.
#[derive(Clone)]
pub struct Hub {
    url: String,
    components: Vec<Arc<dyn HubComponent>>,
    factory: Arc<dyn RequestHandleFactory>,
}

impl Hub {
    /// Create a hub from an explicit ordered component list
    pub fn new(
        url: impl Into<String>,
        components: Vec<Arc<dyn HubComponent>>,
        factory: Arc<dyn RequestHandleFactory>,
    ) -> Self {
        Self {
            url: url.into(),
            components,
            factory,
        }
    }

    /// Create a builder for a hub at `url` using `factory` for requests
    pub fn builder<F>(url: impl Into<String>, factory: F) -> HubBuilder
    where
        F: RequestHandleFactory + 'static,
    {
        HubBuilder::new(url, Arc::new(factory))
    }

    /// The hub endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Registered components, in call order
    pub fn components(&self) -> &[Arc<dyn HubComponent>] {
        &self.components
    }

    /// Compose a request for `operation` without sending it.
    ///
    /// Runs every component phase in registration order: options are merged
    /// per component, parameters are aggregated and assigned to the body in
    /// one step (with `hub.mode` set to `operation`), then each component
    /// mutates the request. Any component error aborts composition and is
    /// reported as [`HubError::Component`] naming the component and phase.
    pub fn prepare(&self, operation: &str, options: &OptionSet) -> Result<Box<dyn RequestHandle>> {
        let mut request = self.factory.create(&self.url)?;

        let mut effective = Vec::with_capacity(self.components.len());
        for component in &self.components {
            debug!(
                operation,
                component = component.name(),
                phase = %Phase::Options,
                "Collecting component options"
            );
            let defaults = component
                .options(self, operation)
                .map_err(|e| e.in_component(component.name(), Phase::Options))?;
            effective.push(OptionSet::effective(&defaults, options));
        }

        let mut aggregator = ParameterAggregator::new();
        for (component, options) in self.components.iter().zip(&effective) {
            debug!(
                operation,
                component = component.name(),
                phase = %Phase::Parameters,
                "Collecting component parameters"
            );
            let parameters = component
                .parameters(self, operation, options)
                .map_err(|e| e.in_component(component.name(), Phase::Parameters))?;
            aggregator.absorb(component.name(), parameters);
        }
        aggregator.reserve(MODE_PARAMETER, operation);
        request.set_body_fields(aggregator.finish());

        for (component, options) in self.components.iter().zip(&effective) {
            debug!(
                operation,
                component = component.name(),
                phase = %Phase::ModifyRequest,
                "Applying component request changes"
            );
            component
                .modify_request(self, operation, options, request.as_mut())
                .map_err(|e| e.in_component(component.name(), Phase::ModifyRequest))?;
        }

        Ok(request)
    }

    /// Compose and execute a request for `operation`.
    ///
    /// The request is executed exactly once, after every component has run.
    /// Component and transport errors are returned as-is; nothing is retried.
    pub async fn make_request(&self, operation: &str, options: &OptionSet) -> Result<HubResponse> {
        let request = self.prepare(operation, options)?;

        debug!(
            operation,
            url = %request.request().url,
            method = %request.request().method,
            fields = request.request().body_fields.len(),
            "Sending hub request"
        );

        request.execute().await
    }

    /// Subscribe to `topic`
    pub async fn subscribe(&self, topic: &str, options: OptionSet) -> Result<HubResponse> {
        self.topic_request(operation::SUBSCRIBE, topic, options).await
    }

    /// Unsubscribe from `topic`
    pub async fn unsubscribe(&self, topic: &str, options: OptionSet) -> Result<HubResponse> {
        self.topic_request(operation::UNSUBSCRIBE, topic, options).await
    }

    /// Notify the hub that `topic` has new content
    pub async fn publish(&self, topic: &str, options: OptionSet) -> Result<HubResponse> {
        self.topic_request(operation::PUBLISH, topic, options).await
    }

    async fn topic_request(
        &self,
        operation: &str,
        topic: &str,
        options: OptionSet,
    ) -> Result<HubResponse> {
        let options = options.with(TOPIC_OPTION, topic);
        self.make_request(operation, &options).await
    }
}

impl fmt::Debug for Hub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.components.iter().map(|c| c.name()).collect();
        f.debug_struct("Hub")
            .field("url", &self.url)
            .field("components", &names)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Hub`]
pub struct HubBuilder {
    url: String,
    components: Vec<Arc<dyn HubComponent>>,
    factory: Arc<dyn RequestHandleFactory>,
}

impl HubBuilder {
    /// Create a builder with no components
    pub fn new(url: impl Into<String>, factory: Arc<dyn RequestHandleFactory>) -> Self {
        Self {
            url: url.into(),
            components: Vec::new(),
            factory,
        }
    }

    /// Append a component; components run in the order they are added
    pub fn component<C>(mut self, component: C) -> Self
    where
        C: HubComponent + 'static,
    {
        self.components.push(Arc::new(component));
        self
    }

    /// Append a component that is shared with other hubs
    pub fn shared_component(mut self, component: Arc<dyn HubComponent>) -> Self {
        self.components.push(component);
        self
    }

    /// Build the hub
    pub fn build(self) -> Hub {
        Hub::new(self.url, self.components, self.factory)
    }
}
