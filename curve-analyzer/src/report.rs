use std::fmt::Write;

use crate::classifier::{classify_with, Classification, SecurityStatus, SingularityType, Tolerances};
use crate::discriminant::compute_discriminant;
use crate::keypair::SimulatedKeyPair;
use crate::params::CurveParams;

/// One canonical demo curve
#[derive(Debug, Clone, Copy)]
pub struct CheatSheetEntry {
    pub title: &'static str,
    pub a: f64,
    pub b: f64,
    pub expected_status: SecurityStatus,
    pub expected_singularity: SingularityType,
}

impl CheatSheetEntry {
    pub fn params(&self) -> CurveParams {
        CurveParams::new(self.a, self.b)
    }

    /// Classify this entry under the given tolerances
    pub fn classify(&self, tolerances: &Tolerances) -> Classification {
        classify_with(compute_discriminant(self.a, self.b), self.a, self.b, tolerances)
    }

    /// Whether `classification` is what the sheet promises for this entry
    pub fn is_expected(&self, classification: &Classification) -> bool {
        classification.status == self.expected_status
            && classification.singularity == self.expected_singularity
    }

    pub fn color_name(&self) -> &'static str {
        match self.expected_status {
            SecurityStatus::Secure => "GREEN",
            SecurityStatus::Insecure => "RED",
        }
    }
}

pub const CHEAT_SHEET: [CheatSheetEntry; 3] = [
    CheatSheetEntry {
        title: "Singular Node",
        a: -3.0,
        b: 2.0,
        expected_status: SecurityStatus::Insecure,
        expected_singularity: SingularityType::Node,
    },
    CheatSheetEntry {
        title: "Singular Cusp",
        a: 0.0,
        b: 0.0,
        expected_status: SecurityStatus::Insecure,
        expected_singularity: SingularityType::Cusp,
    },
    CheatSheetEntry {
        title: "Secure Curve",
        a: -1.0,
        b: 4.0,
        expected_status: SecurityStatus::Secure,
        expected_singularity: SingularityType::None,
    },
];

const RULE_MAJOR: &str = "==================";
const RULE_MINOR: &str = "------------------";

/// Static cheat sheet block listing the three demo curves
pub fn format_cheat_sheet() -> String {
    let mut out = String::from("DEMO CHEAT SHEET (Set sliders to):\n");
    for (i, entry) in CHEAT_SHEET.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let a = format!("{:.1},", entry.a);
        // Values are padded so the b columns line up
        let _ = writeln!(out, "{}. {} ({}):", i + 1, entry.title, entry.color_name());
        let _ = writeln!(out, "   a = {:<5} b = {:.1}", a, entry.b);
    }
    out
}

/// Key block of the report
pub fn format_key_block(key_pair: &SimulatedKeyPair) -> String {
    format!(
        "SIMULATED KEY PAIR GENERATED:\n\
         Private (d): {}\n\
         Public  (Q): {}\n\
         Result:      {}",
        key_pair.private_display,
        key_pair.public_display,
        key_pair.outcome.label()
    )
}

/// Assemble the diagnostics report
///
/// Pure string assembly: identical inputs give byte-identical output.
/// Non-finite values print through f64's `Display` (`inf`, `NaN`).
pub fn format_report(
    params: CurveParams,
    delta: f64,
    classification: &Classification,
    key_pair: &SimulatedKeyPair,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "DIAGNOSTICS REPORT");
    let _ = writeln!(out, "{}", RULE_MAJOR);
    let _ = writeln!(out, "Input a: {:.1}", params.a);
    let _ = writeln!(out, "Input b: {:.1}", params.b);
    let _ = writeln!(out, "Discriminant (Δ): {:.1}", delta);
    let _ = writeln!(out, "{}", RULE_MINOR);
    let _ = writeln!(out, "STATUS: {}", classification.status.label());
    let _ = writeln!(out, "TYPE:   {}", classification.singularity.label());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", classification.description);
    let _ = writeln!(out, "{}", RULE_MINOR);
    let _ = writeln!(out, "{}", classification.action);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", format_key_block(key_pair));
    let _ = writeln!(out, "{}", RULE_MAJOR);
    let _ = writeln!(out);
    out.push_str(&format_cheat_sheet());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::keypair::{KeyOutcome, BLOCKED};

    fn fixed_pair() -> SimulatedKeyPair {
        SimulatedKeyPair {
            private_display: "0x0123456789abcdef...".to_string(),
            public_display: "04000102030405060708090a0b0c0d0e0f...".to_string(),
            outcome: KeyOutcome::Success,
        }
    }

    fn report_for(a: f64, b: f64, key_pair: &SimulatedKeyPair) -> String {
        let delta = compute_discriminant(a, b);
        format_report(
            CurveParams::new(a, b),
            delta,
            &classify(delta, a, b),
            key_pair,
        )
    }

    #[test]
    fn test_secure_report_layout() {
        let report = report_for(-1.0, 4.0, &fixed_pair());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "DIAGNOSTICS REPORT");
        assert_eq!(lines[1], "==================");
        assert_eq!(lines[2], "Input a: -1.0");
        assert_eq!(lines[3], "Input b: 4.0");
        assert_eq!(lines[4], "Discriminant (Δ): -6848.0");
        assert_eq!(lines[6], "STATUS: SECURE (NON-SINGULAR)");
        assert_eq!(lines[7], "TYPE:   Elliptic Curve (Smooth)");
        assert_eq!(lines[9], "Visual: Smooth curve, no crossings.");
        assert!(report.contains("ACTION: KEY GENERATION PERMITTED\n\nSIMULATED KEY PAIR"));
        assert!(report.contains("Private (d): 0x0123456789abcdef...\n"));
        assert!(report.contains("Result:      SUCCESS\n"));
    }

    #[test]
    fn test_insecure_report() {
        let report = report_for(-3.0, 2.0, &SimulatedKeyPair::blocked());

        assert!(report.contains("STATUS: INSECURE (SINGULAR)"));
        assert!(report.contains("TYPE:   NODE (Self-Intersection)"));
        assert_eq!(report.lines().nth(4), Some("Discriminant (Δ): -0.0"));
        assert!(report.contains(&format!("Public  (Q): {}", BLOCKED)));
        assert!(report.contains("Result:      FAILED (Unsafe Curve)"));
    }

    #[test]
    fn test_report_ends_with_cheat_sheet() {
        let report = report_for(0.0, 0.0, &SimulatedKeyPair::blocked());
        let expected = "DEMO CHEAT SHEET (Set sliders to):\n\
                        1. Singular Node (RED):\n   a = -3.0, b = 2.0\n\n\
                        2. Singular Cusp (RED):\n   a = 0.0,  b = 0.0\n\n\
                        3. Secure Curve (GREEN):\n   a = -1.0, b = 4.0\n";
        assert!(report.ends_with(expected));
    }

    #[test]
    fn test_report_is_deterministic() {
        let pair = fixed_pair();
        assert_eq!(report_for(-1.0, 4.0, &pair), report_for(-1.0, 4.0, &pair));
    }

    #[test]
    fn test_non_finite_inputs() {
        let pair = fixed_pair();
        let report = report_for(f64::INFINITY, 0.0, &pair);
        assert!(report.contains("Input a: inf"));
        assert!(report.contains("Discriminant (Δ): -inf"));

        let report = report_for(f64::NAN, f64::NEG_INFINITY, &pair);
        assert!(report.contains("Input a: NaN"));
        assert!(report.contains("Input b: -inf"));
    }

    #[test]
    fn test_cheat_sheet_matches_classifier() {
        for entry in CHEAT_SHEET.iter() {
            let delta = compute_discriminant(entry.a, entry.b);
            let result = classify(delta, entry.a, entry.b);
            assert_eq!(result.status, entry.expected_status, "{}", entry.title);
            assert_eq!(result.singularity, entry.expected_singularity, "{}", entry.title);
        }
    }

    #[test]
    fn test_cheat_sheet_follows_configured_tolerances() {
        let defaults = Tolerances::default();
        for entry in CHEAT_SHEET.iter() {
            assert!(entry.is_expected(&entry.classify(&defaults)), "{}", entry.title);
        }

        // Wide enough that Δ = -6848 counts as singular
        let loose = Tolerances {
            singular_delta: 10_000.0,
            cusp_coefficient: 0.1,
        };
        let secure = &CHEAT_SHEET[2];
        let result = secure.classify(&loose);
        assert_eq!(result.singularity, SingularityType::Node);
        assert!(!secure.is_expected(&result));
    }
}
