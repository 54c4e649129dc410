//! Client configuration capability trait.
//!
//! Every service client has its own configuration type, and each type takes
//! a different subset of the manager's options. A configuration type opts in
//! to a setting by handling it in [`ClientConfig::apply`]; anything it does
//! not handle falls through to the default and is skipped.

use crate::options::ClientSetting;
use crate::region::RegionEndpoint;

/// Configuration object consumed by a managed client's constructor.
///
/// # Example
///
/// ```
/// use aws_manager::config::ClientConfig;
/// use aws_manager::options::ClientSetting;
/// use aws_manager::region::RegionEndpoint;
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct QueueConfig {
///     region: Option<RegionEndpoint>,
///     timeout: Option<Duration>,
/// }
///
/// impl ClientConfig for QueueConfig {
///     fn set_region_endpoint(&mut self, region: RegionEndpoint) {
///         self.region = Some(region);
///     }
///
///     fn apply(&mut self, setting: ClientSetting) -> bool {
///         match setting {
///             ClientSetting::Timeout(timeout) => self.timeout = timeout,
///             _ => return false,
///         }
///         true
///     }
/// }
/// ```
pub trait ClientConfig: Default + Send + 'static {
    /// Set the region the client talks to. Always called.
    fn set_region_endpoint(&mut self, region: RegionEndpoint);

    /// Take `setting` if this configuration supports it.
    ///
    /// Returns `false` when the setting is not supported; the value is then
    /// discarded.
    fn apply(&mut self, setting: ClientSetting) -> bool {
        let _ = setting;
        false
    }
}
