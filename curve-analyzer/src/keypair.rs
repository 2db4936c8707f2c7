//! Simulated key generation
//!
//! The "keys" produced here are random display strings. They are never
//! derived from the curve and must not be used for anything real. Entropy
//! still comes from a cryptographic RNG; the `CryptoRng` bound enforces it.

use rand::{CryptoRng, RngCore};
use serde::Serialize;

/// Placeholder shown in place of keys on a singular curve
pub const BLOCKED: &str = "[BLOCKED]";

/// Hex digits of the 256-bit private scalar that are shown
pub const PRIVATE_HEX_DIGITS: usize = 16;

/// Random bytes behind the shown public point
pub const PUBLIC_BYTES: usize = 16;

/// Length of `private_display` on success: "0x" + digits + "..."
pub const PRIVATE_DISPLAY_LEN: usize = 2 + PRIVATE_HEX_DIGITS + 3;

/// Length of `public_display` on success: "04" + digits + "..."
pub const PUBLIC_DISPLAY_LEN: usize = 2 + PUBLIC_BYTES * 2 + 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyOutcome {
    Success,
    Failed,
}

impl KeyOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            KeyOutcome::Success => "SUCCESS",
            KeyOutcome::Failed => "FAILED (Unsafe Curve)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulatedKeyPair {
    pub private_display: String,
    pub public_display: String,
    pub outcome: KeyOutcome,
}

impl SimulatedKeyPair {
    pub fn blocked() -> Self {
        Self {
            private_display: BLOCKED.to_string(),
            public_display: BLOCKED.to_string(),
            outcome: KeyOutcome::Failed,
        }
    }
}

/// Simulate key generation with the given RNG
///
/// On a secure curve draws a 256-bit private scalar and shows its leading
/// hex digits, then draws a separate value shown behind the `04`
/// uncompressed-point marker. On an insecure curve nothing is drawn.
pub fn simulate_key_pair<R: RngCore + CryptoRng>(secure: bool, rng: &mut R) -> SimulatedKeyPair {
    if !secure {
        return SimulatedKeyPair::blocked();
    }

    let mut private_scalar = [0u8; 32];
    rng.fill_bytes(&mut private_scalar);
    let private_hex = hex::encode(private_scalar);

    let mut public_bytes = [0u8; PUBLIC_BYTES];
    rng.fill_bytes(&mut public_bytes);

    SimulatedKeyPair {
        private_display: format!("0x{}...", &private_hex[..PRIVATE_HEX_DIGITS]),
        public_display: format!("04{}...", hex::encode(public_bytes)),
        outcome: KeyOutcome::Success,
    }
}

/// Simulate key generation with the operating system CSPRNG
pub fn simulate_key_pair_os(secure: bool) -> SimulatedKeyPair {
    let mut rng = rand::rngs::OsRng;
    simulate_key_pair(secure, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn is_hex(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn test_secure_key_pair_shape() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        let pair = simulate_key_pair(true, &mut rng);

        assert_eq!(pair.outcome, KeyOutcome::Success);
        assert_eq!(pair.private_display.len(), PRIVATE_DISPLAY_LEN);
        assert_eq!(pair.public_display.len(), PUBLIC_DISPLAY_LEN);

        let private = pair.private_display.strip_prefix("0x").unwrap();
        assert!(is_hex(private.strip_suffix("...").unwrap()));
        let public = pair.public_display.strip_prefix("04").unwrap();
        assert!(is_hex(public.strip_suffix("...").unwrap()));
    }

    #[test]
    fn test_insecure_key_pair_is_blocked() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        let pair = simulate_key_pair(false, &mut rng);

        assert_eq!(pair.outcome, KeyOutcome::Failed);
        assert_eq!(pair.private_display, "[BLOCKED]");
        assert_eq!(pair.public_display, "[BLOCKED]");
        assert_eq!(pair.outcome.label(), "FAILED (Unsafe Curve)");
    }

    #[test]
    fn test_same_seed_same_display() {
        let pair1 = simulate_key_pair(true, &mut ChaCha20Rng::from_seed([1u8; 32]));
        let pair2 = simulate_key_pair(true, &mut ChaCha20Rng::from_seed([1u8; 32]));
        let pair3 = simulate_key_pair(true, &mut ChaCha20Rng::from_seed([2u8; 32]));

        assert_eq!(pair1, pair2);
        assert_ne!(pair1, pair3);
    }

    #[test]
    fn test_private_and_public_draws_are_separate() {
        let pair = simulate_key_pair(true, &mut ChaCha20Rng::from_seed([3u8; 32]));
        let private = &pair.private_display[2..2 + PRIVATE_HEX_DIGITS];
        let public = &pair.public_display[2..2 + PRIVATE_HEX_DIGITS];
        assert_ne!(private, public);
    }

    #[test]
    fn test_os_rng() {
        let pair = simulate_key_pair_os(true);
        assert_eq!(pair.outcome, KeyOutcome::Success);
        assert_eq!(simulate_key_pair_os(false), SimulatedKeyPair::blocked());
    }
}
