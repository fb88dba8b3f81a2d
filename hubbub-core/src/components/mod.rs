//! Standard PubSubHubbub components
//!
//! Each component owns a small slice of the protocol. A typical subscriber
//! hub registers [`TopicComponent`], [`CallbackComponent`],
//! [`VerifyComponent`], [`LeaseComponent`] and [`SecretComponent`], plus
//! [`HeaderComponent`] or [`BasicAuthComponent`] when the hub needs them.
//!
//! | Component | Options | Body parameters |
//! |-----------|---------|-----------------|
//! | [`TopicComponent`] | `topic` | `hub.topic` / `hub.url` |
//! | [`CallbackComponent`] | `callback` | `hub.callback` |
//! | [`VerifyComponent`] | `verify`, `verify_token` | `hub.verify`, `hub.verify_token` |
//! | [`LeaseComponent`] | `lease_seconds` | `hub.lease_seconds` |
//! | [`SecretComponent`] | `secret` | `hub.secret` |

mod auth;
mod callback;
mod headers;
mod lease;
mod secret;
mod topic;
mod verify;

pub use auth::BasicAuthComponent;
pub use callback::{CALLBACK_OPTION, CallbackComponent};
pub use headers::HeaderComponent;
pub use lease::{LEASE_OPTION, LeaseComponent};
pub use secret::{MAX_SECRET_BYTES, SECRET_OPTION, SecretComponent};
pub use topic::{TOPIC_OPTION, TopicComponent};
pub use verify::{VERIFY_OPTION, VERIFY_TOKEN_OPTION, VerifyComponent, VerifyMode};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{Hub, HubResponse, PendingRequest, RequestHandle, RequestHandleFactory, Result};
    use async_trait::async_trait;

    pub struct NullHandle {
        pub request: PendingRequest,
    }

    #[async_trait]
    impl RequestHandle for NullHandle {
        fn request(&self) -> &PendingRequest {
            &self.request
        }

        fn request_mut(&mut self) -> &mut PendingRequest {
            &mut self.request
        }

        async fn execute(self: Box<Self>) -> Result<HubResponse> {
            Ok(HubResponse::new(http::StatusCode::ACCEPTED))
        }
    }

    pub struct NullFactory;

    impl RequestHandleFactory for NullFactory {
        fn create(&self, url: &str) -> Result<Box<dyn RequestHandle>> {
            Ok(Box::new(NullHandle {
                request: PendingRequest::new(url),
            }))
        }
    }

    pub fn hub() -> Hub {
        Hub::builder("http://hub.example.com", NullFactory).build()
    }

    pub fn handle() -> NullHandle {
        NullHandle {
            request: PendingRequest::new("http://hub.example.com"),
        }
    }
}
