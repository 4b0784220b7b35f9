//! Session code generation.

use rand::Rng;
use wordmafia_protocol::SessionCode;

/// Generates a code of the form `DDD-DDD`.
///
/// Each half is drawn uniformly from `100..=999`, so neither half ever
/// starts with a zero (which would read as a shorter number when spoken
/// aloud). That leaves 900 × 900 = 810,000 codes. Uniqueness is NOT
/// checked here; the lobby handles collisions with a conditional create.
///
/// The random source is a parameter rather than a global so tests can
/// pass a seeded generator and get the same codes every run.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> SessionCode {
    let first: u16 = rng.random_range(100..1000);
    let second: u16 = rng.random_range(100..1000);
    SessionCode::new(format!("{first}-{second}"))
}
