//! The component capability interface

use crate::{Hub, OptionSet, ParameterSet, RequestHandle, Result};

/// A pluggable contributor to hub requests.
///
/// For each request the hub asks every component, in registration order,
/// for its default [`options`](HubComponent::options), then for the
/// [`parameters`](HubComponent::parameters) it adds to the body, and finally
/// lets it [`modify_request`](HubComponent::modify_request) directly.
///
/// The `options` passed to the last two calls are the component's *effective
/// options*: its own declared defaults with caller-supplied values
/// substituted. Options declared by other components are never visible.
///
/// Parameter names should not collide with other components' parameters or
/// with `hub.mode`. When they do, the later component wins and `hub.mode` is
/// never overridden.
///
/// # Example
///
/// ```
/// use hubbub_core::{Hub, HubComponent, OptionSet, ParameterSet, Result};
///
/// struct Language;
///
/// impl HubComponent for Language {
///     fn name(&self) -> &str {
///         "language"
///     }
///
///     fn options(&self, _hub: &Hub, _operation: &str) -> Result<OptionSet> {
///         Ok(OptionSet::new().with("lang", "en"))
///     }
///
///     fn parameters(&self, _hub: &Hub, _operation: &str, options: &OptionSet) -> Result<ParameterSet> {
///         let lang = options.require_string("lang")?;
///         Ok(ParameterSet::new().with("hub.lang", lang))
///     }
/// }
/// ```
pub trait HubComponent: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Default values for the options this component recognizes.
    ///
    /// Must not have side effects. May be empty.
    fn options(&self, _hub: &Hub, _operation: &str) -> Result<OptionSet> {
        Ok(OptionSet::new())
    }

    /// Body parameters derived from the effective options
    fn parameters(
        &self,
        _hub: &Hub,
        _operation: &str,
        _options: &OptionSet,
    ) -> Result<ParameterSet> {
        Ok(ParameterSet::new())
    }

    /// Mutate the pending request, e.g. add headers or change the method
    fn modify_request(
        &self,
        _hub: &Hub,
        _operation: &str,
        _options: &OptionSet,
        _request: &mut dyn RequestHandle,
    ) -> Result<()> {
        Ok(())
    }
}
