//! CVSS vector parsing and canonical serialization
//!
//! A vector string is `CVSS:<version>/<ABBR>:<VALUE>/...`. Parsing is
//! strict: exact version prefix, known metrics only, no duplicates, values
//! from the metric's allowed set, every mandatory metric present. Optional
//! metrics (v4.0 Threat/Environmental/Supplemental) assume their registry
//! default when absent.

use crate::error::{Error, Result};
use crate::metric::{definition, metrics_for};
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated CVSS vector: version tag plus the supplied metric values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedVector {
    version: Version,
    /// Supplied metrics in the order they appeared
    metrics: Vec<(String, String)>,
}

impl ParsedVector {
    /// Parse and validate a vector string
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let mut tokens = text.split('/');
        let prefix = tokens.next().unwrap_or_default();
        let version = Version::from_prefix(prefix)?;

        let mut metrics: Vec<(String, String)> = Vec::new();
        for token in tokens {
            let (abbreviation, value) = token.split_once(':').ok_or_else(|| {
                Error::MalformedToken {
                    token: token.to_string(),
                }
            })?;
            if abbreviation.is_empty() || value.is_empty() || value.contains(':') {
                return Err(Error::MalformedToken {
                    token: token.to_string(),
                });
            }

            let def = definition(version, abbreviation).ok_or_else(|| Error::UnknownMetric {
                abbreviation: abbreviation.to_string(),
            })?;
            if metrics.iter().any(|(a, _)| a == abbreviation) {
                return Err(Error::DuplicateMetric {
                    abbreviation: abbreviation.to_string(),
                });
            }
            if !def.allows(value) {
                return Err(Error::InvalidValue {
                    abbreviation: abbreviation.to_string(),
                    value: value.to_string(),
                });
            }
            metrics.push((abbreviation.to_string(), value.to_string()));
        }

        for def in metrics_for(version) {
            if def.is_mandatory() && !metrics.iter().any(|(a, _)| a == def.abbreviation) {
                return Err(Error::MissingMetric {
                    abbreviation: def.abbreviation.to_string(),
                });
            }
        }

        Ok(Self { version, metrics })
    }

    /// The vector's CVSS version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Value as supplied in the vector, if present
    pub fn get(&self, abbreviation: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|(a, _)| a == abbreviation)
            .map(|(_, v)| v.as_str())
    }

    /// Effective value: the supplied one, or the registry default for an
    /// absent optional metric
    pub fn value(&self, abbreviation: &str) -> Option<&str> {
        self.get(abbreviation)
            .or_else(|| definition(self.version, abbreviation).and_then(|d| d.default))
    }

    /// Canonical minimal serialization: version prefix, then each metric in
    /// registry order; optional metrics at their default value are omitted
    pub fn clean_vector(&self) -> String {
        let mut out = String::from(self.version.prefix());
        for def in metrics_for(self.version) {
            let Some(value) = self.get(def.abbreviation) else {
                continue;
            };
            if def.default == Some(value) {
                continue;
            }
            out.push('/');
            out.push_str(def.abbreviation);
            out.push(':');
            out.push_str(value);
        }
        out
    }
}

/// Vectors compare by effective values, so an explicit default (e.g. `E:X`)
/// equals an omitted one.
impl PartialEq for ParsedVector {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && metrics_for(self.version)
                .iter()
                .all(|d| self.value(d.abbreviation) == other.value(d.abbreviation))
    }
}

impl Eq for ParsedVector {}

impl fmt::Display for ParsedVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clean_vector())
    }
}

impl FromStr for ParsedVector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ParsedVector::parse(s)
    }
}
