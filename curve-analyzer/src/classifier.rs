//! Singularity classification of a curve from its discriminant
//!
//! Equality with zero is tolerance based so that coarse input (a slider with
//! a 0.1 step) can actually land on a singular curve.

use serde::{Deserialize, Serialize};

/// Default |Δ| bound below which a curve counts as singular
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1.0;

/// Default |a|, |b| bound below which a singular curve is the cusp y² = x³
pub const DEFAULT_CUSP_TOLERANCE: f64 = 0.1;

/// Classification thresholds
///
/// Both bounds are tuned to the input resolution rather than derived from the
/// math, so they come from config. They are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    pub singular_delta: f64,
    pub cusp_coefficient: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            singular_delta: DEFAULT_SINGULAR_TOLERANCE,
            cusp_coefficient: DEFAULT_CUSP_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityStatus {
    Secure,
    Insecure,
}

impl SecurityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SecurityStatus::Secure => "SECURE (NON-SINGULAR)",
            SecurityStatus::Insecure => "INSECURE (SINGULAR)",
        }
    }

    pub fn is_secure(&self) -> bool {
        matches!(self, SecurityStatus::Secure)
    }

    pub fn color_hint(&self) -> ColorHint {
        match self {
            SecurityStatus::Secure => ColorHint::Green,
            SecurityStatus::Insecure => ColorHint::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SingularityType {
    None, // smooth elliptic curve
    Cusp, // y² = x³, no tangent at the origin
    Node, // self-intersection, two tangents
}

impl SingularityType {
    pub fn label(&self) -> &'static str {
        match self {
            SingularityType::None => "Elliptic Curve (Smooth)",
            SingularityType::Cusp => "CUSP (y² = x³)",
            SingularityType::Node => "NODE (Self-Intersection)",
        }
    }
}

/// Styling hint for whatever surface displays the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorHint {
    Green,
    Red,
}

impl ColorHint {
    /// ANSI foreground escape for terminals
    pub fn ansi(&self) -> &'static str {
        match self {
            ColorHint::Green => "\x1b[1;32m",
            ColorHint::Red => "\x1b[1;31m",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub status: SecurityStatus,
    pub singularity: SingularityType,
    pub description: String,
    pub action: String,
}

const CUSP_DESCRIPTION: &str = "Visual: Sharp point at origin (0,0).\n\
                                Math:   Tangent is undefined.\n\
                                Risk:   DLP reduces to Additive Group.\n        \
                                Encryption broken in linear time.";

const NODE_DESCRIPTION: &str = "Visual: Curve crosses over itself.\n\
                                Math:   Two tangents at one point.\n\
                                Risk:   DLP reduces to Multiplicative Group.\n        \
                                Encryption broken quickly.";

const SMOOTH_DESCRIPTION: &str = "Visual: Smooth curve, no crossings.\n\
                                  Math:   Roots are distinct (Δ ≠ 0).\n\
                                  Risk:   Standard ECDLP hardness applies.";

pub const ACTION_BLOCKED: &str = "ACTION: KEY GENERATION BLOCKED";
pub const ACTION_PERMITTED: &str = "ACTION: KEY GENERATION PERMITTED";

/// Classify with the default tolerances
pub fn classify(delta: f64, a: f64, b: f64) -> Classification {
    classify_with(delta, a, b, &Tolerances::default())
}

/// Classify a curve from its discriminant and coefficients
///
/// Singular iff |Δ| < `singular_delta`. Only inside the singular branch is
/// the cusp check made: |a| and |b| both below `cusp_coefficient`.
/// Total over f64: a NaN Δ fails the comparison and reads as smooth.
pub fn classify_with(delta: f64, a: f64, b: f64, tolerances: &Tolerances) -> Classification {
    if delta.abs() < tolerances.singular_delta {
        let is_cusp =
            a.abs() < tolerances.cusp_coefficient && b.abs() < tolerances.cusp_coefficient;

        let (singularity, description) = if is_cusp {
            (SingularityType::Cusp, CUSP_DESCRIPTION)
        } else {
            (SingularityType::Node, NODE_DESCRIPTION)
        };

        Classification {
            status: SecurityStatus::Insecure,
            singularity,
            description: description.to_string(),
            action: ACTION_BLOCKED.to_string(),
        }
    } else {
        Classification {
            status: SecurityStatus::Secure,
            singularity: SingularityType::None,
            description: SMOOTH_DESCRIPTION.to_string(),
            action: ACTION_PERMITTED.to_string(),
        }
    }
}
