//! Discriminant analysis for real curves y² = x³ + ax + b
//!
//! Computes Δ = -16(4a³ + 27b²), classifies the curve as singular (cusp or
//! node) or smooth, simulates the outcome of key generation on it and formats
//! a diagnostics report. Everything here is a teaching aid: the curves live
//! over the reals and the "keys" are display strings only.

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod discriminant;
pub mod grid;
pub mod keypair;
pub mod params;
pub mod plot;
pub mod report;
pub mod session;

// Re-export commonly used items

// Analytical core
pub use classifier::{
    classify, classify_with, Classification, ColorHint, SecurityStatus, SingularityType,
    Tolerances,
};
pub use discriminant::compute_discriminant;
pub use keypair::{simulate_key_pair, simulate_key_pair_os, KeyOutcome, SimulatedKeyPair};
pub use params::{CurveParams, InputBounds, InputPolicy};
pub use report::{format_report, CHEAT_SHEET};

// Composition and controller
pub use analyzer::{Analysis, Analyzer};
pub use session::Session;
