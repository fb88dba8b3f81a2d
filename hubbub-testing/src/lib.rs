//! Testing utilities for Hubbub hubs and components.
//!
//! ## Features
//!
//! - **RecordingComponent** - Component with canned options and parameters
//!   that records every call it receives
//! - **MockRequestFactory** - Transport that captures executed requests
//!   instead of sending them
//! - **EventLog** - Shared, ordered record of component calls and request
//!   execution across mocks
//!
//! ## Quick Start
//!
//! ```
//! use hubbub_core::{Hub, OptionSet, ParameterSet};
//! use hubbub_testing::{EventLog, MockRequestFactory, RecordingComponent};
//!
//! # tokio_test::block_on(async {
//! let log = EventLog::new();
//! let factory = MockRequestFactory::new().with_log(log.clone());
//! let component = RecordingComponent::new("a")
//!     .with_parameters(ParameterSet::from([("hub.topic", "http://blog/feed")]))
//!     .with_log(log.clone());
//!
//! let hub = Hub::builder("http://hub.example.com", factory.clone())
//!     .component(component)
//!     .build();
//! hub.make_request("subscribe", &OptionSet::new()).await.unwrap();
//!
//! let sent = factory.last_executed().unwrap();
//! assert_eq!(sent.body_fields.get("hub.mode"), Some("subscribe"));
//! assert_eq!(
//!     log.labels(),
//!     vec!["create", "a.options", "a.parameters", "a.modify_request", "execute"]
//! );
//! # });
//! ```

mod log;
mod mock;

pub use log::{EventLog, HubEvent};
pub use mock::{MockRequestFactory, MockRequestHandle, RecordingComponent};
