//! Hub Request Composition for Hubbub
//!
//! This crate builds outgoing PubSubHubbub (WebSub) hub requests out of
//! independent, pluggable components.
//!
//! # Features
//!
//! - **Components**: Each [`HubComponent`] contributes default options, body
//!   parameters, and direct request mutations
//! - **Option Precedence**: Caller options override a component's declared
//!   defaults, and components only ever see their own option keys
//! - **Parameter Aggregation**: Contributions are merged deterministically,
//!   with the reserved `hub.mode` field always set to the operation
//! - **Single Execution**: Every call composes one request and sends it once
//! - **Pluggable Transport**: Requests go through a [`RequestHandleFactory`]
//! - **Standard Components**: Topic, callback, verify, lease, secret, headers
//!   and basic auth out of the box
//!
//! # Example
//!
//! ```rust,no_run
//! use hubbub_core::components::{CallbackComponent, TopicComponent};
//! use hubbub_core::{Hub, OptionSet, RequestHandleFactory};
//!
//! async fn subscribe(factory: impl RequestHandleFactory + 'static) -> hubbub_core::Result<()> {
//!     let hub = Hub::builder("https://pubsubhubbub.example.com/", factory)
//!         .component(TopicComponent::new())
//!         .component(CallbackComponent::new("https://me.example.com/push"))
//!         .build();
//!
//!     hub.subscribe("https://blog.example.com/feed", OptionSet::new()).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Example: From Configuration
//!
//! ```rust,no_run
//! use hubbub_core::{HubConfig, RequestHandleFactory};
//!
//! fn hub(factory: impl RequestHandleFactory + 'static) -> hubbub_core::Result<hubbub_core::Hub> {
//!     let config = HubConfig::from_toml_str(r#"
//!         url = "https://pubsubhubbub.example.com/"
//!         callback = "https://me.example.com/push"
//!         lease_seconds = 86400
//!     "#)?;
//!     config.build_hub(factory)
//! }
//! ```

mod component;
pub mod components;
mod config;
mod error;
mod hub;
pub mod operation;
mod options;
mod parameters;
mod request;

pub use component::HubComponent;
pub use config::{DEFAULT_ENV_PREFIX, HubConfig, HubConfigBuilder};
pub use error::{HubError, Phase, Result, TransportError};
pub use hub::{Hub, HubBuilder};
pub use options::OptionSet;
pub use parameters::{ParameterAggregator, ParameterSet};
pub use request::{HubResponse, PendingRequest, RequestHandle, RequestHandleFactory};

// Re-export common types
pub use http::{HeaderMap, Method, StatusCode};

/// Prelude for common imports.
///
/// ```
/// use hubbub_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::components::{
        BasicAuthComponent, CallbackComponent, HeaderComponent, LeaseComponent, SecretComponent,
        TopicComponent, VerifyComponent, VerifyMode,
    };
    pub use crate::operation::{PUBLISH, SUBSCRIBE, UNSUBSCRIBE};
    pub use crate::{
        Hub, HubBuilder, HubComponent, HubConfig, HubError, HubResponse, OptionSet, ParameterSet,
        PendingRequest, RequestHandle, RequestHandleFactory, Result,
    };
}
