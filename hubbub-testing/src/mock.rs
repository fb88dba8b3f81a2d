// Mock components and transports for testing

use crate::{EventLog, HubEvent};
use async_trait::async_trait;
use hubbub_core::{
    Hub, HubComponent, HubError, HubResponse, OptionSet, ParameterSet, PendingRequest, Phase,
    RequestHandle, RequestHandleFactory, Result, StatusCode,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Component with canned answers that records every call.
///
/// Several components can share one [`EventLog`] (see
/// [`with_log`](RecordingComponent::with_log)) to check call order across
/// components.
#[derive(Debug, Clone)]
pub struct RecordingComponent {
    name: String,
    defaults: OptionSet,
    parameters: ParameterSet,
    headers: Vec<(String, String)>,
    fail_in: Option<Phase>,
    log: EventLog,
}

impl RecordingComponent {
    /// Create a component with no options, parameters or mutations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defaults: OptionSet::new(),
            parameters: ParameterSet::new(),
            headers: Vec::new(),
            fail_in: None,
            log: EventLog::new(),
        }
    }

    /// Declare default options
    pub fn with_defaults(mut self, defaults: OptionSet) -> Self {
        self.defaults = defaults;
        self
    }

    /// Contribute fixed body parameters
    pub fn with_parameters(mut self, parameters: ParameterSet) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set a header during the mutation phase
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Fail with a component error in `phase`
    pub fn failing_in(mut self, phase: Phase) -> Self {
        self.fail_in = Some(phase);
        self
    }

    /// Record into a shared log
    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    /// The log this component records into
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Events recorded by this component
    pub fn calls(&self) -> Vec<HubEvent> {
        self.log
            .events()
            .into_iter()
            .filter(|event| match event {
                HubEvent::Options { component, .. }
                | HubEvent::Parameters { component, .. }
                | HubEvent::ModifyRequest { component, .. } => component == &self.name,
                _ => false,
            })
            .collect()
    }

    /// Effective options received by `parameters`, one entry per call
    pub fn parameter_options(&self) -> Vec<OptionSet> {
        self.calls()
            .into_iter()
            .filter_map(|event| match event {
                HubEvent::Parameters { options, .. } => Some(options),
                _ => None,
            })
            .collect()
    }

    /// Effective options received by `modify_request`, one entry per call
    pub fn modify_options(&self) -> Vec<OptionSet> {
        self.calls()
            .into_iter()
            .filter_map(|event| match event {
                HubEvent::ModifyRequest { options, .. } => Some(options),
                _ => None,
            })
            .collect()
    }

    fn check(&self, phase: Phase) -> Result<()> {
        if self.fail_in == Some(phase) {
            return Err(HubError::component(&self.name, phase, "configured to fail"));
        }
        Ok(())
    }
}

impl HubComponent for RecordingComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn options(&self, _hub: &Hub, operation: &str) -> Result<OptionSet> {
        self.log.record(HubEvent::Options {
            component: self.name.clone(),
            operation: operation.to_string(),
        });
        self.check(Phase::Options)?;
        Ok(self.defaults.clone())
    }

    fn parameters(&self, _hub: &Hub, operation: &str, options: &OptionSet) -> Result<ParameterSet> {
        self.log.record(HubEvent::Parameters {
            component: self.name.clone(),
            operation: operation.to_string(),
            options: options.clone(),
        });
        self.check(Phase::Parameters)?;
        Ok(self.parameters.clone())
    }

    fn modify_request(
        &self,
        _hub: &Hub,
        operation: &str,
        options: &OptionSet,
        request: &mut dyn RequestHandle,
    ) -> Result<()> {
        self.log.record(HubEvent::ModifyRequest {
            component: self.name.clone(),
            operation: operation.to_string(),
            options: options.clone(),
        });
        self.check(Phase::ModifyRequest)?;
        for (name, value) in &self.headers {
            request.set_header(name, value)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct TransportState {
    status: StatusCode,
    body: Vec<u8>,
    failure: Option<String>,
    created: Vec<String>,
    executed: Vec<PendingRequest>,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            status: StatusCode::ACCEPTED,
            body: Vec::new(),
            failure: None,
            created: Vec::new(),
            executed: Vec::new(),
        }
    }
}

/// Request factory that never touches the network.
///
/// Every executed request is captured exactly as it looked at execution
/// time. Answers `202 Accepted` unless told otherwise.
#[derive(Debug, Clone, Default)]
pub struct MockRequestFactory {
    state: Arc<Mutex<TransportState>>,
    log: Option<EventLog>,
}

impl MockRequestFactory {
    /// Create a factory answering `202 Accepted`
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with `status`
    pub fn respond_with(self, status: StatusCode) -> Self {
        self.state.lock().status = status;
        self
    }

    /// Answer every request with `body`
    pub fn respond_with_body(self, body: impl Into<Vec<u8>>) -> Self {
        self.state.lock().body = body.into();
        self
    }

    /// Fail every execution with a transport error
    pub fn fail_transport(self, message: impl Into<String>) -> Self {
        self.state.lock().failure = Some(message.into());
        self
    }

    /// Record `Create` and `Execute` events into a shared log
    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    /// URLs handles were created for
    pub fn created_urls(&self) -> Vec<String> {
        self.state.lock().created.clone()
    }

    /// Requests as they were executed
    pub fn executed(&self) -> Vec<PendingRequest> {
        self.state.lock().executed.clone()
    }

    /// Number of executed requests
    pub fn execute_count(&self) -> usize {
        self.state.lock().executed.len()
    }

    /// The most recently executed request
    pub fn last_executed(&self) -> Option<PendingRequest> {
        self.state.lock().executed.last().cloned()
    }
}

impl RequestHandleFactory for MockRequestFactory {
    fn create(&self, url: &str) -> Result<Box<dyn RequestHandle>> {
        self.state.lock().created.push(url.to_string());
        if let Some(log) = &self.log {
            log.record(HubEvent::Create {
                url: url.to_string(),
            });
        }

        Ok(Box::new(MockRequestHandle {
            request: PendingRequest::new(url),
            state: self.state.clone(),
            log: self.log.clone(),
        }))
    }
}

/// Handle produced by [`MockRequestFactory`]
#[derive(Debug)]
pub struct MockRequestHandle {
    request: PendingRequest,
    state: Arc<Mutex<TransportState>>,
    log: Option<EventLog>,
}

#[async_trait]
impl RequestHandle for MockRequestHandle {
    fn request(&self) -> &PendingRequest {
        &self.request
    }

    fn request_mut(&mut self) -> &mut PendingRequest {
        &mut self.request
    }

    async fn execute(self: Box<Self>) -> Result<HubResponse> {
        if let Some(log) = &self.log {
            log.record(HubEvent::Execute {
                url: self.request.url.clone(),
            });
        }

        let mut state = self.state.lock();
        state.executed.push(self.request.clone());

        if let Some(message) = &state.failure {
            return Err(HubError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message.clone(),
            )));
        }

        Ok(HubResponse::new(state.status).with_body(state.body.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_factory_records_execution() {
        let factory = MockRequestFactory::new().respond_with(StatusCode::NO_CONTENT);

        let mut handle = factory.create("http://hub.example.com").unwrap();
        handle.set_header("X-Test", "1").unwrap();
        let response = handle.execute().await.unwrap();

        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert_eq!(factory.created_urls(), vec!["http://hub.example.com"]);
        assert_eq!(factory.execute_count(), 1);
        assert_eq!(
            factory.last_executed().unwrap().header("x-test"),
            Some("1")
        );
    }

    #[tokio::test]
    async fn test_factory_failure() {
        let factory = MockRequestFactory::new().fail_transport("connection refused");

        let handle = factory.create("http://hub.example.com").unwrap();
        let err = handle.execute().await.unwrap_err();

        assert!(matches!(err, HubError::Transport(_)));
        assert_eq!(factory.execute_count(), 1);
    }

    #[test]
    fn test_component_failure() {
        let hub = Hub::builder("http://hub.example.com", MockRequestFactory::new()).build();
        let component = RecordingComponent::new("a").failing_in(Phase::Options);

        assert!(component.options(&hub, "test").is_err());
        assert_eq!(component.calls().len(), 1);
    }
}
