//! CVSS version tags

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported CVSS versions
///
/// v3.0 and v3.1 share metrics and formulas; they are distinguished so the
/// clean vector keeps its original prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    #[serde(rename = "3.0")]
    V30,
    #[serde(rename = "3.1")]
    V31,
    #[serde(rename = "4.0")]
    V40,
}

impl Version {
    /// Resolve the leading vector token (e.g. "CVSS:3.1"), exact match only
    pub fn from_prefix(prefix: &str) -> Result<Self> {
        match prefix {
            "CVSS:3.0" => Ok(Version::V30),
            "CVSS:3.1" => Ok(Version::V31),
            "CVSS:4.0" => Ok(Version::V40),
            _ => Err(Error::UnsupportedVersion {
                prefix: prefix.to_string(),
            }),
        }
    }

    /// Version number as it appears in reports ("3.1", "4.0")
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V30 => "3.0",
            Version::V31 => "3.1",
            Version::V40 => "4.0",
        }
    }

    /// Leading vector token for this version
    pub fn prefix(&self) -> &'static str {
        match self {
            Version::V30 => "CVSS:3.0",
            Version::V31 => "CVSS:3.1",
            Version::V40 => "CVSS:4.0",
        }
    }

    /// Whether this is a v4.0 vector (macrovector scoring)
    pub fn is_v4(&self) -> bool {
        matches!(self, Version::V40)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "3.0" => Ok(Version::V30),
            "3.1" => Ok(Version::V31),
            "4.0" => Ok(Version::V40),
            _ => Err(Error::UnsupportedVersion {
                prefix: s.to_string(),
            }),
        }
    }
}
