//! CVSS v3.x Base score computation
//!
//! Closed-form formulas from the CVSS v3.1 specification: an impact
//! sub-score and an exploitability sub-score, combined and rounded up to
//! one decimal. The same weights and rounding apply to v3.0 vectors.

use vectorscore_core::ParsedVector;

/// Compute the Base score for a validated v3.x vector
pub fn score(vector: &ParsedVector) -> f64 {
    let scope_changed = metric(vector, "S") == "C";

    let iss = 1.0
        - (1.0 - impact_weight(metric(vector, "C")))
            * (1.0 - impact_weight(metric(vector, "I")))
            * (1.0 - impact_weight(metric(vector, "A")));

    let impact = if scope_changed {
        7.52 * (iss - 0.029) - 3.25 * (iss - 0.02).powi(15)
    } else {
        6.42 * iss
    };

    let exploitability = 8.22
        * av_weight(metric(vector, "AV"))
        * ac_weight(metric(vector, "AC"))
        * pr_weight(metric(vector, "PR"), scope_changed)
        * ui_weight(metric(vector, "UI"));

    if impact <= 0.0 {
        return 0.0;
    }

    if scope_changed {
        round_up((1.08 * (impact + exploitability)).min(10.0))
    } else {
        round_up((impact + exploitability).min(10.0))
    }
}

fn metric<'a>(vector: &'a ParsedVector, abbreviation: &str) -> &'a str {
    vector.value(abbreviation).unwrap_or("")
}

fn av_weight(value: &str) -> f64 {
    match value {
        "N" => 0.85,
        "A" => 0.62,
        "L" => 0.55,
        _ => 0.2, // P
    }
}

fn ac_weight(value: &str) -> f64 {
    match value {
        "L" => 0.77,
        _ => 0.44, // H
    }
}

fn pr_weight(value: &str, scope_changed: bool) -> f64 {
    match (value, scope_changed) {
        ("N", _) => 0.85,
        ("L", false) => 0.62,
        ("L", true) => 0.68,
        ("H", false) => 0.27,
        _ => 0.5, // ("H", true)
    }
}

fn ui_weight(value: &str) -> f64 {
    match value {
        "N" => 0.85,
        _ => 0.62, // R
    }
}

fn impact_weight(value: &str) -> f64 {
    match value {
        "H" => 0.56,
        "L" => 0.22,
        _ => 0.0, // N
    }
}

/// One-decimal ceiling from Appendix A of the v3.1 specification.
/// Integer arithmetic sidesteps the floating point drift that would
/// otherwise round e.g. 8.6 up to 8.7.
fn round_up(value: f64) -> f64 {
    let scaled = (value * 100_000.0).round() as i64;
    if scaled % 10_000 == 0 {
        scaled as f64 / 100_000.0
    } else {
        ((scaled / 10_000) + 1) as f64 / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectorscore_core::ParsedVector;

    fn score_of(text: &str) -> f64 {
        score(&ParsedVector::parse(text).unwrap())
    }

    #[test]
    fn test_network_full_impact() {
        assert_eq!(score_of("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"), 9.8);
    }

    #[test]
    fn test_scope_changed_full_impact() {
        assert_eq!(score_of("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:C/C:H/I:H/A:H"), 10.0);
    }

    #[test]
    fn test_local_hard_to_exploit() {
        assert_eq!(score_of("CVSS:3.1/AV:L/AC:H/PR:H/UI:R/S:U/C:N/I:N/A:L"), 1.8);
    }

    #[test]
    fn test_confidentiality_only() {
        assert_eq!(score_of("CVSS:3.1/AV:N/AC:L/PR:L/UI:N/S:U/C:H/I:N/A:N"), 6.5);
    }

    #[test]
    fn test_reflected_xss_shape() {
        assert_eq!(score_of("CVSS:3.1/AV:N/AC:L/PR:N/UI:R/S:C/C:L/I:L/A:N"), 6.1);
    }

    #[test]
    fn test_changed_scope_pr_weight() {
        // PR:L weighs 0.68 under changed scope, not 0.62
        assert_eq!(score_of("CVSS:3.1/AV:N/AC:L/PR:L/UI:N/S:C/C:L/I:L/A:N"), 6.4);
    }

    #[test]
    fn test_no_impact_scores_zero() {
        assert_eq!(score_of("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N"), 0.0);
        assert_eq!(score_of("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:C/C:N/I:N/A:N"), 0.0);
    }

    #[test]
    fn test_v30_uses_same_formulas() {
        assert_eq!(score_of("CVSS:3.0/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"), 9.8);
    }

    #[test]
    fn test_round_up() {
        assert_eq!(round_up(4.0), 4.0);
        assert_eq!(round_up(4.02), 4.1);
        assert_eq!(round_up(4.07), 4.1);
        // 8.6 must not drift up through float representation
        assert_eq!(round_up(8.6), 8.6);
        assert_eq!(round_up(0.0), 0.0);
        assert_eq!(round_up(10.0), 10.0);
    }
}
