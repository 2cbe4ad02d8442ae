//! Shopify Admin API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for selecting which version
//! of the Admin API the client addresses. Versions follow Shopify's
//! quarterly `YYYY-MM` naming, plus the rolling `unstable` version.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// The Shopify Admin API version used to build request paths.
///
/// The version is embedded into every request path as
/// `admin/api/{version}/...`.
///
/// # Example
///
/// ```rust
/// use shopify_admin::ApiVersion;
///
/// assert_eq!(ApiVersion::latest().to_string(), "2020-04");
/// let version: ApiVersion = "2020-01".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2020_01);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum ApiVersion {
    /// The 2019-10 stable version.
    V2019_10,
    /// The 2020-01 stable version.
    V2020_01,
    /// The 2020-04 stable version.
    V2020_04,
    /// The rolling unstable version.
    Unstable,
}

impl ApiVersion {
    /// Returns the latest stable API version known to this crate.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2020_04
    }

    /// Returns the version string as used in request paths.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V2019_10 => "2019-10",
            Self::V2020_01 => "2020-01",
            Self::V2020_04 => "2020-04",
            Self::Unstable => "unstable",
        }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2019-10" => Ok(Self::V2019_10),
            "2020-01" => Ok(Self::V2020_01),
            "2020-04" => Ok(Self::V2020_04),
            "unstable" => Ok(Self::Unstable),
            other => Err(ConfigError::InvalidApiVersion {
                version: other.to_string(),
            }),
        }
    }
}
