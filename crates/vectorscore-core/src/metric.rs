//! Metric definitions and per-version registries
//!
//! Each supported CVSS version has a fixed catalog of metrics: the canonical
//! vector order, the allowed value letters, and a default for metrics that
//! may be omitted. The catalogs are compile-time constants; value sets come
//! from the published CVSS v3.1 and v4.0 specifications.

use crate::version::Version;

/// Metric group within a CVSS vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricGroup {
    Base,
    Threat,
    Environmental,
    Supplemental,
}

/// Definition of a single CVSS metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDefinition {
    /// Abbreviation as it appears in the vector (e.g. "AV")
    pub abbreviation: &'static str,
    /// Allowed values in specification order
    pub values: &'static [&'static str],
    /// Value assumed when the metric is absent; `None` makes it mandatory
    pub default: Option<&'static str>,
    /// Metric group
    pub group: MetricGroup,
}

impl MetricDefinition {
    const fn mandatory(
        abbreviation: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self {
            abbreviation,
            values,
            default: None,
            group: MetricGroup::Base,
        }
    }

    const fn optional(
        abbreviation: &'static str,
        values: &'static [&'static str],
        group: MetricGroup,
    ) -> Self {
        Self {
            abbreviation,
            values,
            default: Some("X"),
            group,
        }
    }

    /// Whether the metric must be supplied in every vector
    pub fn is_mandatory(&self) -> bool {
        self.default.is_none()
    }

    /// Whether `value` belongs to this metric's allowed set
    pub fn allows(&self, value: &str) -> bool {
        self.values.iter().any(|v| *v == value)
    }
}

/// v3.x Base metrics in canonical vector order
pub const V3_METRICS: &[MetricDefinition] = &[
    MetricDefinition::mandatory("AV", &["N", "A", "L", "P"]),
    MetricDefinition::mandatory("AC", &["L", "H"]),
    MetricDefinition::mandatory("PR", &["N", "L", "H"]),
    MetricDefinition::mandatory("UI", &["N", "R"]),
    MetricDefinition::mandatory("S", &["U", "C"]),
    MetricDefinition::mandatory("C", &["N", "L", "H"]),
    MetricDefinition::mandatory("I", &["N", "L", "H"]),
    MetricDefinition::mandatory("A", &["N", "L", "H"]),
];

/// v4.0 metrics in canonical vector order: the mandatory Base group,
/// then the optional Threat, Environmental and Supplemental groups.
/// Optional metrics default to Not Defined ("X") and may be omitted.
pub const V4_METRICS: &[MetricDefinition] = &[
    // Base (mandatory)
    MetricDefinition::mandatory("AV", &["N", "A", "L", "P"]),
    MetricDefinition::mandatory("AC", &["L", "H"]),
    MetricDefinition::mandatory("AT", &["N", "P"]),
    MetricDefinition::mandatory("PR", &["N", "L", "H"]),
    MetricDefinition::mandatory("UI", &["N", "P", "A"]),
    MetricDefinition::mandatory("VC", &["H", "L", "N"]),
    MetricDefinition::mandatory("VI", &["H", "L", "N"]),
    MetricDefinition::mandatory("VA", &["H", "L", "N"]),
    MetricDefinition::mandatory("SC", &["H", "L", "N"]),
    MetricDefinition::mandatory("SI", &["H", "L", "N"]),
    MetricDefinition::mandatory("SA", &["H", "L", "N"]),
    // Threat
    MetricDefinition::optional("E", &["X", "A", "P", "U"], MetricGroup::Threat),
    // Environmental
    MetricDefinition::optional("CR", &["X", "H", "M", "L"], MetricGroup::Environmental),
    MetricDefinition::optional("IR", &["X", "H", "M", "L"], MetricGroup::Environmental),
    MetricDefinition::optional("AR", &["X", "H", "M", "L"], MetricGroup::Environmental),
    MetricDefinition::optional("MAV", &["X", "N", "A", "L", "P"], MetricGroup::Environmental),
    MetricDefinition::optional("MAC", &["X", "L", "H"], MetricGroup::Environmental),
    MetricDefinition::optional("MAT", &["X", "N", "P"], MetricGroup::Environmental),
    MetricDefinition::optional("MPR", &["X", "N", "L", "H"], MetricGroup::Environmental),
    MetricDefinition::optional("MUI", &["X", "N", "P", "A"], MetricGroup::Environmental),
    MetricDefinition::optional("MVC", &["X", "H", "L", "N"], MetricGroup::Environmental),
    MetricDefinition::optional("MVI", &["X", "H", "L", "N"], MetricGroup::Environmental),
    MetricDefinition::optional("MVA", &["X", "H", "L", "N"], MetricGroup::Environmental),
    MetricDefinition::optional("MSC", &["X", "H", "L", "N"], MetricGroup::Environmental),
    MetricDefinition::optional("MSI", &["X", "S", "H", "L", "N"], MetricGroup::Environmental),
    MetricDefinition::optional("MSA", &["X", "S", "H", "L", "N"], MetricGroup::Environmental),
    // Supplemental
    MetricDefinition::optional("S", &["X", "N", "P"], MetricGroup::Supplemental),
    MetricDefinition::optional("AU", &["X", "N", "Y"], MetricGroup::Supplemental),
    MetricDefinition::optional("R", &["X", "A", "U", "I"], MetricGroup::Supplemental),
    MetricDefinition::optional("V", &["X", "D", "C"], MetricGroup::Supplemental),
    MetricDefinition::optional("RE", &["X", "L", "M", "H"], MetricGroup::Supplemental),
    MetricDefinition::optional(
        "U",
        &["X", "Clear", "Green", "Amber", "Red"],
        MetricGroup::Supplemental,
    ),
];

/// Metric catalog for a version, in canonical vector order
pub fn metrics_for(version: Version) -> &'static [MetricDefinition] {
    match version {
        Version::V30 | Version::V31 => V3_METRICS,
        Version::V40 => V4_METRICS,
    }
}

/// Look up a single metric definition by abbreviation
pub fn definition(version: Version, abbreviation: &str) -> Option<&'static MetricDefinition> {
    metrics_for(version)
        .iter()
        .find(|d| d.abbreviation == abbreviation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_v3_catalog_order() {
        let order: Vec<&str> = V3_METRICS.iter().map(|d| d.abbreviation).collect();
        assert_eq!(order, ["AV", "AC", "PR", "UI", "S", "C", "I", "A"]);
        assert!(V3_METRICS.iter().all(|d| d.is_mandatory()));
    }

    #[test]
    fn test_v4_base_group_is_mandatory() {
        let base: Vec<&str> = V4_METRICS
            .iter()
            .filter(|d| d.group == MetricGroup::Base)
            .map(|d| d.abbreviation)
            .collect();
        assert_eq!(
            base,
            ["AV", "AC", "AT", "PR", "UI", "VC", "VI", "VA", "SC", "SI", "SA"]
        );
        assert!(V4_METRICS
            .iter()
            .filter(|d| d.group == MetricGroup::Base)
            .all(|d| d.is_mandatory()));
        assert!(V4_METRICS
            .iter()
            .filter(|d| d.group != MetricGroup::Base)
            .all(|d| d.default == Some("X")));
    }

    #[test]
    fn test_abbreviations_unique_per_version() {
        for version in [Version::V31, Version::V40] {
            let mut seen = HashSet::new();
            for def in metrics_for(version) {
                assert!(seen.insert(def.abbreviation), "dup {}", def.abbreviation);
                assert!(!def.values.is_empty());
            }
        }
    }

    #[test]
    fn test_definition_lookup() {
        let av = definition(Version::V31, "AV").unwrap();
        assert!(av.allows("N"));
        assert!(!av.allows("Z"));
        assert!(definition(Version::V31, "VC").is_none());
        assert!(definition(Version::V40, "VC").is_some());
        assert!(definition(Version::V40, "MSI").unwrap().allows("S"));
    }
}
