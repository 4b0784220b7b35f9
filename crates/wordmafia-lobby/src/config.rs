//! Lobby configuration.

/// Settings for a [`LobbyManager`](crate::LobbyManager).
///
/// Start from `LobbyConfig::default()` and override what you need:
///
/// ```rust
/// use wordmafia_lobby::LobbyConfig;
///
/// let config = LobbyConfig {
///     min_players: 3,
///     ..LobbyConfig::default()
/// };
/// assert_eq!(config.create_attempts, 2);
/// ```
#[derive(Debug, Clone)]
pub struct LobbyConfig {
    /// Players required before a session may start.
    pub min_players: usize,

    /// Longest accepted player name, in characters (after trimming).
    pub max_name_len: usize,

    /// Conditional creates tried per `create` call before reporting a
    /// code conflict. 2 means "retry once on collision".
    pub create_attempts: u32,

    /// Fresh-read retries `start` makes when a concurrent join moved the
    /// session's version between its read and its write.
    pub start_retry_budget: u32,

    /// Shown to the saboteur in place of the secret word.
    pub saboteur_instruction: String,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            min_players: 4,
            max_name_len: 32,
            create_attempts: 2,
            start_retry_budget: 16,
            saboteur_instruction:
                "You are the Saboteur! Blend in and work out the secret word.".into(),
        }
    }
}
