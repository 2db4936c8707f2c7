//! One full evaluation: discriminant → classification → key simulation → report

use rand::{CryptoRng, RngCore};
use serde::Serialize;

use crate::classifier::{classify_with, Classification, ColorHint, Tolerances};
use crate::discriminant::compute_discriminant;
use crate::keypair::{simulate_key_pair, SimulatedKeyPair};
use crate::params::CurveParams;
use crate::report::format_report;

/// Result of analyzing one curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub params: CurveParams,
    pub discriminant: f64,
    pub classification: Classification,
    pub key_pair: SimulatedKeyPair,
    pub color: ColorHint,
    pub report: String,
}

impl Analysis {
    pub fn is_secure(&self) -> bool {
        self.classification.status.is_secure()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    tolerances: Tolerances,
}

impl Analyzer {
    pub fn new(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Run the pipeline for `params`
    ///
    /// The RNG is the only side effect; it is consumed only when the curve is
    /// secure. Nothing is retained between calls.
    pub fn analyze<R: RngCore + CryptoRng>(&self, params: CurveParams, rng: &mut R) -> Analysis {
        let discriminant = compute_discriminant(params.a, params.b);
        let classification = classify_with(discriminant, params.a, params.b, &self.tolerances);

        tracing::debug!(
            "Analyzed a={} b={}: Δ={} status={:?} type={:?}",
            params.a,
            params.b,
            discriminant,
            classification.status,
            classification.singularity
        );

        let key_pair = simulate_key_pair(classification.status.is_secure(), rng);
        let report = format_report(params, discriminant, &classification, &key_pair);

        Analysis {
            params,
            discriminant,
            color: classification.status.color_hint(),
            classification,
            key_pair,
            report,
        }
    }

    /// Run the pipeline with the operating system CSPRNG
    pub fn analyze_os(&self, params: CurveParams) -> Analysis {
        let mut rng = rand::rngs::OsRng;
        self.analyze(params, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{SecurityStatus, SingularityType};
    use crate::keypair::KeyOutcome;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn seeded() -> ChaCha20Rng {
        ChaCha20Rng::from_seed([42u8; 32])
    }

    #[test]
    fn test_secure_pipeline() {
        let analysis = Analyzer::default().analyze(CurveParams::new(-1.0, 4.0), &mut seeded());

        assert_eq!(analysis.discriminant, -6848.0);
        assert_eq!(analysis.classification.status, SecurityStatus::Secure);
        assert_eq!(analysis.key_pair.outcome, KeyOutcome::Success);
        assert_eq!(analysis.color, ColorHint::Green);
        assert!(analysis.report.contains(&analysis.key_pair.private_display));
    }

    #[test]
    fn test_insecure_pipeline() {
        let analysis = Analyzer::default().analyze(CurveParams::new(0.0, 0.0), &mut seeded());

        assert!(!analysis.is_secure());
        assert_eq!(analysis.classification.singularity, SingularityType::Cusp);
        assert_eq!(analysis.key_pair.outcome, KeyOutcome::Failed);
        assert_eq!(analysis.color, ColorHint::Red);
    }

    #[test]
    fn test_same_seed_same_analysis() {
        let analyzer = Analyzer::default();
        let params = CurveParams::new(2.5, -1.3);
        assert_eq!(
            analyzer.analyze(params, &mut seeded()),
            analyzer.analyze(params, &mut seeded())
        );
    }

    #[test]
    fn test_insecure_curve_does_not_draw_entropy() {
        let analyzer = Analyzer::default();
        let mut rng = seeded();
        analyzer.analyze(CurveParams::new(-3.0, 2.0), &mut rng);
        let after_insecure = analyzer.analyze(CurveParams::new(-1.0, 4.0), &mut rng);
        let fresh = analyzer.analyze(CurveParams::new(-1.0, 4.0), &mut seeded());

        assert_eq!(after_insecure.key_pair, fresh.key_pair);
    }

    #[test]
    fn test_configured_tolerances_are_used() {
        let loose = Analyzer::new(Tolerances {
            singular_delta: 10_000.0,
            cusp_coefficient: 0.1,
        });
        let analysis = loose.analyze(CurveParams::new(-1.0, 4.0), &mut seeded());
        assert_eq!(analysis.classification.singularity, SingularityType::Node);
    }

    #[test]
    fn test_json_shape() {
        let analysis = Analyzer::default().analyze(CurveParams::new(-3.0, 2.0), &mut seeded());
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["classification"]["status"], "INSECURE");
        assert_eq!(json["classification"]["singularity"], "NODE");
        assert_eq!(json["key_pair"]["outcome"], "FAILED");
        assert_eq!(json["color"], "red");
        assert_eq!(json["params"]["a"], -3.0);
    }
}
