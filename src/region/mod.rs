//! AWS regions and location-to-region resolution.
//!
//! The catalog is a closed, ordered list of known regions. It is built once
//! per process on first use and shared read-only afterwards.

use crate::error::{ManagerError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A known AWS region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionEndpoint {
    system_name: &'static str,
    display_name: &'static str,
}

macro_rules! regions {
    ($($ident:ident => ($system:literal, $display:literal)),+ $(,)?) => {
        impl RegionEndpoint {
            $(
                #[doc = $display]
                pub const $ident: RegionEndpoint = RegionEndpoint {
                    system_name: $system,
                    display_name: $display,
                };
            )+
        }

        const CATALOG: &[RegionEndpoint] = &[$(RegionEndpoint::$ident),+];
    };
}

regions! {
    US_EAST_1 => ("us-east-1", "US East (N. Virginia)"),
    US_EAST_2 => ("us-east-2", "US East (Ohio)"),
    US_WEST_1 => ("us-west-1", "US West (N. California)"),
    US_WEST_2 => ("us-west-2", "US West (Oregon)"),
    AF_SOUTH_1 => ("af-south-1", "Africa (Cape Town)"),
    AP_EAST_1 => ("ap-east-1", "Asia Pacific (Hong Kong)"),
    AP_SOUTH_1 => ("ap-south-1", "Asia Pacific (Mumbai)"),
    AP_NORTHEAST_1 => ("ap-northeast-1", "Asia Pacific (Tokyo)"),
    AP_NORTHEAST_2 => ("ap-northeast-2", "Asia Pacific (Seoul)"),
    AP_NORTHEAST_3 => ("ap-northeast-3", "Asia Pacific (Osaka)"),
    AP_SOUTHEAST_1 => ("ap-southeast-1", "Asia Pacific (Singapore)"),
    AP_SOUTHEAST_2 => ("ap-southeast-2", "Asia Pacific (Sydney)"),
    CA_CENTRAL_1 => ("ca-central-1", "Canada (Central)"),
    EU_CENTRAL_1 => ("eu-central-1", "Europe (Frankfurt)"),
    EU_NORTH_1 => ("eu-north-1", "Europe (Stockholm)"),
    EU_SOUTH_1 => ("eu-south-1", "Europe (Milan)"),
    EU_WEST_1 => ("eu-west-1", "Europe (Ireland)"),
    EU_WEST_2 => ("eu-west-2", "Europe (London)"),
    EU_WEST_3 => ("eu-west-3", "Europe (Paris)"),
    ME_SOUTH_1 => ("me-south-1", "Middle East (Bahrain)"),
    SA_EAST_1 => ("sa-east-1", "South America (Sao Paulo)"),
    CN_NORTH_1 => ("cn-north-1", "China (Beijing)"),
    CN_NORTHWEST_1 => ("cn-northwest-1", "China (Ningxia)"),
    US_GOV_EAST_1 => ("us-gov-east-1", "AWS GovCloud (US-East)"),
    US_GOV_WEST_1 => ("us-gov-west-1", "AWS GovCloud (US-West)"),
}

static REGIONS: Lazy<Vec<RegionEndpoint>> = Lazy::new(|| CATALOG.to_vec());

/// The process-wide region catalog, in a stable order.
pub fn catalog() -> &'static [RegionEndpoint] {
    REGIONS.as_slice()
}

impl RegionEndpoint {
    /// The region identifier, e.g. `us-east-1`.
    pub fn system_name(&self) -> &'static str {
        self.system_name
    }

    /// Human-readable region name.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Look up a catalog region by its identifier (case-insensitive).
    pub fn by_system_name(name: &str) -> Option<RegionEndpoint> {
        catalog()
            .iter()
            .find(|region| region.system_name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// DNS suffix of the partition this region belongs to.
    pub fn dns_suffix(&self) -> &'static str {
        if self.system_name.starts_with("cn-") {
            "amazonaws.com.cn"
        } else {
            "amazonaws.com"
        }
    }
}

impl fmt::Display for RegionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.system_name)
    }
}

impl From<RegionEndpoint> for String {
    fn from(region: RegionEndpoint) -> Self {
        region.system_name.to_string()
    }
}

impl TryFrom<String> for RegionEndpoint {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        RegionEndpoint::by_system_name(&value).ok_or_else(|| format!("Unknown region: {}", value))
    }
}

/// Resolve the region a location points at using the default matcher.
///
/// Returns the first catalog region whose identifier appears in the
/// location's host, ignoring case. Locations without a host never match.
pub fn resolve_region(location: &Url) -> Option<RegionEndpoint> {
    let host = location.host_str()?.to_ascii_lowercase();
    catalog()
        .iter()
        .find(|region| host.contains(region.system_name))
        .copied()
}

/// Resolve the region a location points at using a caller-supplied matcher.
///
/// The matcher receives the raw location. A missing matcher is an
/// [`ManagerError::InvalidArgument`].
pub fn resolve_region_with<F>(location: &Url, matcher: Option<F>) -> Result<Option<RegionEndpoint>>
where
    F: FnOnce(&Url) -> Option<RegionEndpoint>,
{
    let matcher = matcher.ok_or(ManagerError::invalid_argument("matcher"))?;
    Ok(matcher(location))
}

/// Parse `location` and resolve it with the default matcher.
pub fn resolve_region_str(location: &str) -> Result<Option<RegionEndpoint>> {
    let url = Url::parse(location).map_err(|_| ManagerError::invalid_argument("location"))?;
    Ok(resolve_region(&url))
}

/// Region resolution as a method on [`Url`].
pub trait UrlRegionExt {
    /// See [`resolve_region`].
    fn to_region_endpoint(&self) -> Option<RegionEndpoint>;
}

impl UrlRegionExt for Url {
    fn to_region_endpoint(&self) -> Option<RegionEndpoint> {
        resolve_region(self)
    }
}
