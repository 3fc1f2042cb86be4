//! CVSS v4.0 score computation
//!
//! v4.0 has no closed-form polynomial. The eleven Base metrics (plus the
//! worst-case defaults for absent Threat/Environmental metrics) reduce to
//! six equivalence-set levels; the concatenated levels select a reference
//! score from the macrovector table. The final score then interpolates
//! toward the next lower macrovector of each equivalence set, in
//! proportion to how far the vector sits from the most severe vectors of
//! its own macrovector, so scores do not jump at set boundaries.

use crate::macrovector;
use tracing::debug;
use vectorscore_core::{Error, ParsedVector, Result};

/// Compute the score for a validated v4.0 vector
pub fn score(vector: &ParsedVector) -> Result<f64> {
    // A vector with no impact anywhere scores zero outright.
    if ["VC", "VI", "VA", "SC", "SI", "SA"]
        .iter()
        .all(|metric| m(vector, metric) == "N")
    {
        return Ok(0.0);
    }

    let eq = levels(vector);
    let key = key_of(eq);
    let value = macrovector::lookup(&key).ok_or_else(|| Error::TableLookup { key: key.clone() })?;
    debug!(%key, value, "macrovector reference score");

    // Next lower macrovector along each equivalence set, where one exists.
    // EQ3 and EQ6 move jointly; at (0,0) both single-step neighbors exist
    // and the higher-scoring one bounds the drop.
    let lower_eq3eq6 = match (eq[2], eq[5]) {
        (0, 0) => {
            let left = lookup(bump(eq, 5));
            let right = lookup(bump(eq, 2));
            match (left, right) {
                (Some(l), Some(r)) => Some(l.max(r)),
                (l, r) => l.or(r),
            }
        }
        (0, 1) | (1, 1) => lookup(bump(eq, 2)),
        (1, 0) => lookup(bump(eq, 5)),
        _ => None,
    };
    let lowers = [
        lookup(bump(eq, 0)),
        lookup(bump(eq, 1)),
        lower_eq3eq6,
        lookup(bump(eq, 3)),
        lookup(bump(eq, 4)),
    ];

    // Depth of each equivalence set at its current level, in level steps:
    // how much less severe a vector can get without leaving the
    // macrovector.
    let depths = [
        [1, 4, 5][eq[0] as usize],
        [1, 2][eq[1] as usize],
        match (eq[2], eq[5]) {
            (0, 0) => 7,
            (0, 1) => 6,
            (1, 0) | (1, 1) => 8,
            _ => 10,
        },
        [6, 5, 4][eq[3] as usize],
        1,
    ];

    let distances = severity_distances(vector, eq);

    let mut drop = 0.0;
    let mut reachable = 0u32;
    for ((lower, distance), depth) in lowers.iter().zip(distances).zip(depths) {
        if let Some(lower) = lower {
            reachable += 1;
            let proportion = f64::from(distance) / f64::from(2 * depth);
            drop += (value - lower) * proportion;
        }
    }
    if reachable > 0 {
        drop /= f64::from(reachable);
    }

    let adjusted = (value - drop).clamp(0.0, 10.0);
    Ok((adjusted * 10.0).round() / 10.0)
}

/// Effective value of a metric: the environmental override wins when
/// defined, and absent Threat/requirement metrics take the worst-case
/// defaults (E:A, CR/IR/AR:H)
fn m<'a>(vector: &'a ParsedVector, metric: &str) -> &'a str {
    match metric {
        "E" => match vector.get("E") {
            Some("X") | None => "A",
            Some(value) => value,
        },
        "CR" | "IR" | "AR" => match vector.get(metric) {
            Some("X") | None => "H",
            Some(value) => value,
        },
        _ => {
            if let Some(modified) = modified_name(metric) {
                if let Some(value) = vector.get(modified) {
                    if value != "X" {
                        return value;
                    }
                }
            }
            vector.get(metric).unwrap_or("")
        }
    }
}

fn modified_name(metric: &str) -> Option<&'static str> {
    Some(match metric {
        "AV" => "MAV",
        "AC" => "MAC",
        "AT" => "MAT",
        "PR" => "MPR",
        "UI" => "MUI",
        "VC" => "MVC",
        "VI" => "MVI",
        "VA" => "MVA",
        "SC" => "MSC",
        "SI" => "MSI",
        "SA" => "MSA",
        _ => return None,
    })
}

/// Classify the vector into its six equivalence-set levels
fn levels(vector: &ParsedVector) -> [u8; 6] {
    let av = m(vector, "AV");
    let pr = m(vector, "PR");
    let ui = m(vector, "UI");
    let eq1 = if av == "N" && pr == "N" && ui == "N" {
        0
    } else if (av == "N" || pr == "N" || ui == "N") && av != "P" {
        1
    } else {
        2
    };

    let eq2 = u8::from(!(m(vector, "AC") == "L" && m(vector, "AT") == "N"));

    let vc = m(vector, "VC");
    let vi = m(vector, "VI");
    let va = m(vector, "VA");
    let eq3 = if vc == "H" && vi == "H" {
        0
    } else if vc == "H" || vi == "H" || va == "H" {
        1
    } else {
        2
    };

    let eq4 = if vector.get("MSI") == Some("S") || vector.get("MSA") == Some("S") {
        0
    } else if m(vector, "SC") == "H" || m(vector, "SI") == "H" || m(vector, "SA") == "H" {
        1
    } else {
        2
    };

    let eq5 = match m(vector, "E") {
        "A" => 0,
        "P" => 1,
        _ => 2,
    };

    let eq6 = if (m(vector, "CR") == "H" && vc == "H")
        || (m(vector, "IR") == "H" && vi == "H")
        || (m(vector, "AR") == "H" && va == "H")
    {
        0
    } else {
        1
    };

    [eq1, eq2, eq3, eq4, eq5, eq6]
}

fn key_of(levels: [u8; 6]) -> String {
    levels.iter().map(|d| char::from(b'0' + d)).collect()
}

fn lookup(levels: [u8; 6]) -> Option<f64> {
    macrovector::lookup(&key_of(levels))
}

fn bump(mut levels: [u8; 6], index: usize) -> [u8; 6] {
    levels[index] += 1;
    levels
}

/// The most severe vectors of each equivalence-set level. Candidates are
/// tried in order; the first whose metrics are all at least as severe as
/// the scored vector's is the comparison point for severity distance.
const EQ1_MAXES: [&[&str]; 3] = [
    &["AV:N/PR:N/UI:N"],
    &["AV:A/PR:N/UI:N", "AV:N/PR:L/UI:N", "AV:N/PR:N/UI:P"],
    &["AV:P/PR:N/UI:N", "AV:A/PR:L/UI:P"],
];
const EQ2_MAXES: [&[&str]; 2] = [&["AC:L/AT:N"], &["AC:H/AT:N", "AC:L/AT:P"]];
const EQ4_MAXES: [&[&str]; 3] = [
    &["SC:H/SI:S/SA:S"],
    &["SC:H/SI:H/SA:H"],
    &["SC:L/SI:L/SA:L"],
];
const EQ5_MAXES: [&[&str]; 3] = [&["E:A"], &["E:P"], &["E:U"]];

fn eq3eq6_maxes(eq3: u8, eq6: u8) -> &'static [&'static str] {
    match (eq3, eq6) {
        (0, 0) => &["VC:H/VI:H/VA:H/CR:H/IR:H/AR:H"],
        (0, 1) => &[
            "VC:H/VI:H/VA:L/CR:M/IR:M/AR:H",
            "VC:H/VI:H/VA:H/CR:M/IR:M/AR:M",
        ],
        (1, 0) => &[
            "VC:L/VI:H/VA:H/CR:H/IR:H/AR:H",
            "VC:H/VI:L/VA:H/CR:H/IR:H/AR:H",
        ],
        (1, 1) => &[
            "VC:L/VI:H/VA:L/CR:H/IR:M/AR:H",
            "VC:L/VI:H/VA:H/CR:H/IR:M/AR:M",
            "VC:H/VI:L/VA:H/CR:M/IR:H/AR:M",
            "VC:H/VI:L/VA:L/CR:M/IR:H/AR:H",
            "VC:L/VI:L/VA:H/CR:H/IR:H/AR:M",
        ],
        _ => &["VC:L/VI:L/VA:L/CR:H/IR:H/AR:H"],
    }
}

/// Distance from the vector to the most severe vectors of its own
/// macrovector, summed per equivalence set. Measured in level steps of a
/// twentieth so everything stays integral.
fn severity_distances(vector: &ParsedVector, eq: [u8; 6]) -> [i32; 5] {
    let groups: [&[&str]; 5] = [
        EQ1_MAXES[eq[0] as usize],
        EQ2_MAXES[eq[1] as usize],
        eq3eq6_maxes(eq[2], eq[5]),
        EQ4_MAXES[eq[3] as usize],
        EQ5_MAXES[eq[4] as usize],
    ];
    groups.map(|candidates| {
        candidates
            .iter()
            .find_map(|max| {
                let mut sum = 0;
                for (abbreviation, max_value) in
                    max.split('/').filter_map(|t| t.split_once(':'))
                {
                    let d = level(abbreviation, m(vector, abbreviation))
                        - level(abbreviation, max_value);
                    if d < 0 {
                        return None;
                    }
                    sum += d;
                }
                Some(sum)
            })
            .unwrap_or(0)
    })
}

/// Position of a value within its metric's severity ordering, in
/// twentieths (Safety sits half a step above High)
fn level(metric: &str, value: &str) -> i32 {
    match metric {
        "AV" => match value {
            "N" => 0,
            "A" => 2,
            "L" => 4,
            _ => 6, // P
        },
        "PR" | "UI" => match value {
            "N" => 0,
            "L" | "P" => 2,
            _ => 4, // H / A
        },
        "AC" | "AT" => match value {
            "L" | "N" => 0,
            _ => 2, // H / P
        },
        "VC" | "VI" | "VA" => match value {
            "H" => 0,
            "L" => 2,
            _ => 4, // N
        },
        "SC" | "SI" | "SA" => match value {
            "S" => 1,
            "H" => 2,
            "L" => 4,
            _ => 6, // N
        },
        "CR" | "IR" | "AR" => match value {
            "H" => 0,
            "M" => 2,
            _ => 4, // L
        },
        "E" => match value {
            "A" => 0,
            "P" => 2,
            _ => 4, // U
        },
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectorscore_core::ParsedVector;

    fn score_of(text: &str) -> f64 {
        score(&ParsedVector::parse(text).unwrap()).unwrap()
    }

    #[test]
    fn test_network_full_vulnerable_impact() {
        assert_eq!(
            score_of("CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N"),
            9.3
        );
    }

    #[test]
    fn test_full_impact_both_systems() {
        assert_eq!(
            score_of("CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:H/SI:H/SA:H"),
            10.0
        );
    }

    #[test]
    fn test_adjacent_and_local_attack_vectors() {
        assert_eq!(
            score_of("CVSS:4.0/AV:A/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N"),
            8.7
        );
        // AV:L sits two level steps below the EQ1 maximum, so the score
        // interpolates below the 8.7 macrovector reference
        assert_eq!(
            score_of("CVSS:4.0/AV:L/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N"),
            8.6
        );
    }

    #[test]
    fn test_user_interaction_passive() {
        assert_eq!(
            score_of("CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:P/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N"),
            8.7
        );
    }

    #[test]
    fn test_threat_metric_lowers_score() {
        assert_eq!(
            score_of("CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N/E:U"),
            8.1
        );
        // E:A is the default, so spelling it out changes nothing
        assert_eq!(
            score_of("CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N/E:A"),
            9.3
        );
    }

    #[test]
    fn test_safety_subsequent_impact() {
        assert_eq!(
            score_of(
                "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N/MSI:S"
            ),
            10.0
        );
    }

    #[test]
    fn test_no_impact_scores_zero() {
        assert_eq!(
            score_of("CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:N/VI:N/VA:N/SC:N/SI:N/SA:N"),
            0.0
        );
    }

    #[test]
    fn test_least_severe_macrovector() {
        // bottom of the table, no interpolation room below
        assert_eq!(
            score_of("CVSS:4.0/AV:P/AC:H/AT:P/PR:H/UI:A/VC:L/VI:L/VA:L/SC:L/SI:L/SA:L"),
            1.0
        );
    }

    #[test]
    fn test_classification_levels() {
        let vector = ParsedVector::parse(
            "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N",
        )
        .unwrap();
        assert_eq!(levels(&vector), [0, 0, 0, 2, 0, 0]);

        let vector = ParsedVector::parse(
            "CVSS:4.0/AV:P/AC:H/AT:P/PR:H/UI:A/VC:N/VI:N/VA:L/SC:H/SI:N/SA:N/E:P",
        )
        .unwrap();
        assert_eq!(levels(&vector), [2, 1, 2, 1, 1, 1]);
    }

    #[test]
    fn test_environmental_override_changes_classification() {
        let base = "CVSS:4.0/AV:P/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N";
        let vector = ParsedVector::parse(base).unwrap();
        assert_eq!(levels(&vector)[0], 2);

        let modified = ParsedVector::parse(&format!("{base}/MAV:N")).unwrap();
        assert_eq!(levels(&modified)[0], 0);
    }
}
