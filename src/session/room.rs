//! Room codes identifying multiplayer sessions.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Characters a generated room code is drawn from.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Opaque short token identifying a room.
///
/// Codes are canonicalized to uppercase on construction so that matching
/// is case-insensitive on both the create and join paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Length of a generated code.
    pub const LEN: usize = 6;

    /// Canonicalizes an entered code: trimmed, uppercased.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Generates a fresh 6-character alphanumeric code.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let code = (0..Self::LEN)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// The canonical code text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
