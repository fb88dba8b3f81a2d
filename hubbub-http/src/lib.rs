//! # Hubbub HTTP Transport
//!
//! [`RequestHandleFactory`](hubbub_core::RequestHandleFactory) implementation
//! backed by `reqwest`. Each hub request becomes one form-encoded HTTP call;
//! timeouts, redirects and TLS are configured here rather than in the hub.
//!
//! Nothing is retried. Network failures surface as
//! [`HubError::Transport`](hubbub_core::HubError::Transport) and non-2xx
//! answers as [`HubError::Status`](hubbub_core::HubError::Status) (unless
//! disabled with [`HttpHandleConfigBuilder::allow_error_status`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hubbub_core::components::{CallbackComponent, TopicComponent};
//! use hubbub_core::{Hub, OptionSet};
//! use hubbub_http::{HttpHandleConfig, HttpRequestFactory};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let factory = HttpRequestFactory::new(
//!         HttpHandleConfig::builder()
//!             .timeout(Duration::from_secs(10))
//!             .build(),
//!     )?;
//!
//!     let hub = Hub::builder("https://pubsubhubbub.example.com/", factory)
//!         .component(TopicComponent::new())
//!         .component(CallbackComponent::new("https://me.example.com/push"))
//!         .build();
//!
//!     let response = hub
//!         .subscribe("https://blog.example.com/feed", OptionSet::new())
//!         .await?;
//!     println!("Hub answered {}", response.status);
//!     Ok(())
//! }
//! ```

mod config;
mod handle;

pub use config::{HttpHandleConfig, HttpHandleConfigBuilder};
pub use handle::{HttpRequestFactory, HttpRequestHandle};
