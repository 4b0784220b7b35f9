//! Where secret words come from.

use rand::RngCore;
use rand::seq::IndexedRandom;

use crate::LobbyError;

/// The words used when no pool is configured.
pub const DEFAULT_WORDS: &[&str] = &["apple", "banana", "cherry", "date", "elderberry"];

/// Supplies the shared secret word when a session starts.
///
/// The lobby passes in its own random source so a seeded test run
/// picks the same word every time.
pub trait WordPool: Send + Sync + 'static {
    fn pick_word(&self, rng: &mut dyn RngCore) -> String;
}

/// A fixed, non-empty list of words picked uniformly.
#[derive(Debug, Clone)]
pub struct StaticWordPool {
    words: Vec<String>,
}

impl StaticWordPool {
    /// Builds a pool from `words`, dropping blank entries.
    ///
    /// # Errors
    /// [`LobbyError::Validation`] if no usable word remains.
    pub fn new<I, S>(words: I) -> Result<Self, LobbyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .map(|w: String| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(LobbyError::Validation("word pool must not be empty".into()));
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Default for StaticWordPool {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl WordPool for StaticWordPool {
    fn pick_word(&self, rng: &mut dyn RngCore) -> String {
        // `new` and `default` both guarantee at least one word.
        self.words.choose(rng).cloned().unwrap_or_default()
    }
}
