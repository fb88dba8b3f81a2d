// Hubbub - composable PubSubHubbub (WebSub) hub requests
//
// This library builds hub-bound requests (subscribe, unsubscribe, publish)
// from ordered, pluggable components and sends each one exactly once.

// Re-export core functionality
pub use hubbub_core::*;

// Re-export optional crates
#[cfg(feature = "http")]
pub use hubbub_http;

#[cfg(feature = "testing")]
pub use hubbub_testing;

// Prelude for common imports
pub mod prelude {
    pub use hubbub_core::prelude::*;

    #[cfg(feature = "http")]
    pub use hubbub_http::{HttpHandleConfig, HttpRequestFactory};
}
