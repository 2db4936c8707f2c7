use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coefficients of y² = x³ + ax + b
///
/// Immutable per evaluation; a change of input produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveParams {
    pub a: f64,
    pub b: f64,
}

impl CurveParams {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn with_a(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn with_b(self, b: f64) -> Self {
        Self { b, ..self }
    }
}

/// Which coefficient a single-value input addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coefficient {
    A,
    B,
}

impl FromStr for Coefficient {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "a" => Ok(Coefficient::A),
            "b" => Ok(Coefficient::B),
            _ => anyhow::bail!("Unknown coefficient: {} (expected 'a' or 'b')", s),
        }
    }
}

impl Coefficient {
    pub fn as_str(&self) -> &'static str {
        match self {
            Coefficient::A => "a",
            Coefficient::B => "b",
        }
    }
}

/// What to do with input outside the accepted range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Clamp into range and snap to the step grid
    Clamp,
    /// Refuse with an invalid-parameter error
    Reject,
}

/// Accepted range and resolution of a coefficient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            min: -5.0,
            max: 5.0,
            step: 0.1,
        }
    }
}

impl InputBounds {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp into [min, max] and round to the nearest step
    ///
    /// NaN has no sensible clamp target and maps to the midpoint.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.snap((self.min + self.max) / 2.0);
        }
        self.snap(value.clamp(self.min, self.max))
    }

    fn snap(&self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Trim float noise left by the step multiplication
        let snapped = (snapped * 1e9).round() / 1e9;
        let snapped = snapped.clamp(self.min, self.max);
        // Avoid printing "-0.0"
        if snapped == 0.0 {
            0.0
        } else {
            snapped
        }
    }

    /// Apply the input policy to one raw value
    pub fn admit(&self, name: &str, value: f64, policy: InputPolicy) -> Result<f64> {
        match policy {
            InputPolicy::Clamp => {
                let clamped = self.clamp(value);
                if clamped != value {
                    tracing::debug!("Clamped {} from {} to {}", name, value, clamped);
                }
                Ok(clamped)
            }
            InputPolicy::Reject => {
                if !value.is_finite() || !self.contains(value) {
                    tracing::warn!("Rejected {} = {}", name, value);
                    anyhow::bail!(
                        "Invalid parameter: {} = {} (must be within [{}, {}])",
                        name,
                        value,
                        self.min,
                        self.max
                    );
                }
                Ok(value)
            }
        }
    }

    /// Validate a full pair of raw coefficients
    pub fn admit_params(&self, a: f64, b: f64, policy: InputPolicy) -> Result<CurveParams> {
        Ok(CurveParams::new(
            self.admit("a", a, policy)?,
            self.admit("b", b, policy)?,
        ))
    }
}

/// Parse one coefficient typed by the user
pub fn parse_value(text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid parameter: '{}' is not a number", text.trim()))
}
