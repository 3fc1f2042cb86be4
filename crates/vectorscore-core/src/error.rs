//! Error types for vectorscore

use thiserror::Error;

/// Result type alias using the vectorscore Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing or scoring a CVSS vector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // === Version Errors ===
    #[error("unsupported CVSS version prefix '{prefix}' (expected CVSS:3.0, CVSS:3.1 or CVSS:4.0)")]
    UnsupportedVersion { prefix: String },

    // === Vector Grammar Errors ===
    #[error("malformed vector token '{token}' (expected METRIC:VALUE)")]
    MalformedToken { token: String },

    #[error("unknown metric '{abbreviation}'")]
    UnknownMetric { abbreviation: String },

    #[error("duplicate metric '{abbreviation}'")]
    DuplicateMetric { abbreviation: String },

    #[error("invalid value '{value}' for metric '{abbreviation}'")]
    InvalidValue { abbreviation: String, value: String },

    #[error("missing mandatory metric '{abbreviation}'")]
    MissingMetric { abbreviation: String },

    // === Internal Errors ===
    #[error("no macrovector table entry for key '{key}'")]
    TableLookup { key: String },
}

impl Error {
    /// Check if this error indicates a defect in the engine itself rather
    /// than bad caller input
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::TableLookup { .. })
    }

    /// Get an error code for logging/metrics
    pub fn code(&self) -> &'static str {
        match self {
            Error::UnsupportedVersion { .. } => "UNSUPPORTED_VERSION",
            Error::MalformedToken { .. } => "MALFORMED_TOKEN",
            Error::UnknownMetric { .. } => "UNKNOWN_METRIC",
            Error::DuplicateMetric { .. } => "DUPLICATE_METRIC",
            Error::InvalidValue { .. } => "INVALID_VALUE",
            Error::MissingMetric { .. } => "MISSING_METRIC",
            Error::TableLookup { .. } => "TABLE_LOOKUP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = Error::InvalidValue {
            abbreviation: "AV".into(),
            value: "Z".into(),
        };
        assert_eq!(err.code(), "INVALID_VALUE");
        assert!(!err.is_fatal());

        let err = Error::TableLookup { key: "999999".into() };
        assert_eq!(err.code(), "TABLE_LOOKUP");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_error_display_names_offender() {
        let err = Error::InvalidValue {
            abbreviation: "AV".into(),
            value: "Z".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("AV"));
        assert!(msg.contains('Z'));
    }
}
