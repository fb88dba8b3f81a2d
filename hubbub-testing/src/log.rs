// Shared event log for hub mocks

use hubbub_core::OptionSet;
use parking_lot::Mutex;
use std::sync::Arc;

/// Something a mock observed during a hub request
#[derive(Debug, Clone, PartialEq)]
pub enum HubEvent {
    /// A component was asked for its default options
    Options { component: String, operation: String },
    /// A component was asked for parameters
    Parameters {
        component: String,
        operation: String,
        options: OptionSet,
    },
    /// A component was allowed to modify the request
    ModifyRequest {
        component: String,
        operation: String,
        options: OptionSet,
    },
    /// The factory created a request handle
    Create { url: String },
    /// A request handle was executed
    Execute { url: String },
}

impl HubEvent {
    /// Short label like `"a.options"` or `"execute"`, handy for order checks
    pub fn label(&self) -> String {
        match self {
            Self::Options { component, .. } => format!("{}.options", component),
            Self::Parameters { component, .. } => format!("{}.parameters", component),
            Self::ModifyRequest { component, .. } => format!("{}.modify_request", component),
            Self::Create { .. } => "create".to_string(),
            Self::Execute { .. } => "execute".to_string(),
        }
    }
}

/// Event log shared between mocks, cheap to clone
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<HubEvent>>>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event
    pub fn record(&self, event: HubEvent) {
        self.events.lock().push(event);
    }

    /// All recorded events
    pub fn events(&self) -> Vec<HubEvent> {
        self.events.lock().clone()
    }

    /// Labels of all recorded events, in order
    pub fn labels(&self) -> Vec<String> {
        self.events.lock().iter().map(HubEvent::label).collect()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Clear all events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}
