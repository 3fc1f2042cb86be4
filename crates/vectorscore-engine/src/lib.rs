//! Vectorscore Engine - CVSS vector scoring
//!
//! This crate turns a CVSS vector string into a score, a severity rating
//! and the canonical clean vector:
//! - v3.0/v3.1 Base scores via the closed-form specification formulas
//! - v4.0 scores via macrovector classification and interpolation
//!
//! The engine is purely functional: no I/O, no shared mutable state, safe
//! to call concurrently.

pub mod v3;
pub mod v4;

mod macrovector;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vectorscore_core::{ParsedVector, Result, Severity, Version};

/// Outcome of scoring a single vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// CVSS version of the input vector
    pub version: Version,
    /// Numeric score, one decimal place in [0.0, 10.0]
    pub score: f64,
    /// Qualitative rating for the score
    pub severity: Severity,
    /// Canonical clean form of the input vector
    pub vector: String,
}

/// Parse a vector string and compute its score, severity and clean vector
pub fn compute(text: &str) -> Result<ScoreResult> {
    let vector = ParsedVector::parse(text)?;
    let score = match vector.version() {
        Version::V30 | Version::V31 => v3::score(&vector),
        Version::V40 => v4::score(&vector)?,
    };
    let severity = Severity::from_score(score);
    debug!(version = %vector.version(), score, %severity, "scored vector");

    Ok(ScoreResult {
        version: vector.version(),
        score,
        severity,
        vector: vector.clean_vector(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_v31() {
        let result = compute("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H").unwrap();
        assert_eq!(result.version, Version::V31);
        assert_eq!(result.score, 9.8);
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(result.vector, "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H");
    }

    #[test]
    fn test_compute_v40() {
        let result =
            compute("CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N").unwrap();
        assert_eq!(result.version, Version::V40);
        assert_eq!(result.score, 9.3);
        assert_eq!(result.severity, Severity::Critical);
    }

    #[test]
    fn test_compute_cleans_vector() {
        // out-of-order metrics and an explicit default are normalized away
        let result =
            compute("CVSS:4.0/AC:L/AV:N/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N/E:X")
                .unwrap();
        assert_eq!(
            result.vector,
            "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N"
        );
    }

    #[test]
    fn test_compute_propagates_parse_errors() {
        use vectorscore_core::Error;

        assert!(matches!(
            compute("CVSS:2.0/AV:N"),
            Err(Error::UnsupportedVersion { .. })
        ));
        assert!(matches!(
            compute("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H"),
            Err(Error::MissingMetric { .. })
        ));
    }

    #[test]
    fn test_result_serializes_like_a_report() {
        let result = compute("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["version"], "3.1");
        assert_eq!(json["severity"], "Critical");
        assert_eq!(json["score"], 9.8);
    }
}
