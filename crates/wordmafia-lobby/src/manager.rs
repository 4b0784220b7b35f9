//! Session lifecycle manager: create, join, start and read sessions.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wordmafia_protocol::{Player, Session, SessionCode, SessionStatus, SessionView};
use wordmafia_store::{
    Precondition, PutOutcome, SessionStore, SessionUpdate, StoreError, UpdateOutcome,
};

use crate::code::generate_code;
use crate::roles::assign_roles;
use crate::view::project;
use crate::{LobbyConfig, LobbyError, WordPool};

const ALREADY_STARTED: &str = "game already started";

/// Drives every session through `Pending → Started`.
///
/// All state lives in the store; the manager itself only holds the
/// random source, so one instance can be shared (behind an `Arc`) by
/// every connection task. Each mutation is a single conditional store
/// write, which is what keeps concurrent joins and starts race-free.
pub struct LobbyManager<S: SessionStore, W: WordPool> {
    store: S,
    words: W,
    config: LobbyConfig,

    /// Locked only around synchronous draws, never across an `.await`.
    rng: Mutex<StdRng>,
}

impl<S: SessionStore, W: WordPool> LobbyManager<S, W> {
    /// Creates a manager with an OS-seeded random source.
    pub fn new(store: S, words: W, config: LobbyConfig) -> Self {
        Self::with_rng(store, words, config, StdRng::from_os_rng())
    }

    /// Creates a manager drawing codes, words and roles from `rng`.
    ///
    /// With a seeded generator every draw is reproducible, which is what
    /// the tests rely on.
    pub fn with_rng(store: S, words: W, config: LobbyConfig, rng: StdRng) -> Self {
        Self {
            store,
            words,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &LobbyConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a pending session hosted by `host_name`.
    ///
    /// A freshly generated code can collide with a live session. The
    /// write is a create-if-absent, so a collision never overwrites
    /// anything; the manager draws another code and tries again, up to
    /// `create_attempts` times in total.
    pub async fn create(&self, host_name: &str) -> Result<Session, LobbyError> {
        let host_name = self.validate_name(host_name)?;
        let attempts = self.config.create_attempts.max(1);

        for attempt in 1..=attempts {
            let code = self.draw_code();
            let session = Session::new(code.clone(), Player::host(host_name), Utc::now());

            match self.store.put_if_absent(session.clone()).await? {
                PutOutcome::Created => {
                    tracing::info!(%code, host = %host_name, "session created");
                    return Ok(session);
                }
                PutOutcome::AlreadyExists => {
                    tracing::warn!(%code, attempt, "session code collision");
                }
            }
        }

        Err(LobbyError::Conflict(format!(
            "all {attempts} generated codes were already in use"
        )))
    }

    /// Adds `player_name` to a pending session and returns the result.
    ///
    /// Goes through the store's atomic append, so concurrent joins all
    /// land. Names need not be unique.
    pub async fn join(&self, code: &str, player_name: &str) -> Result<Session, LobbyError> {
        let code = validate_code(code)?;
        let player_name = self.validate_name(player_name)?;

        let outcome = self
            .store
            .append_player(
                &code,
                Player::new(player_name),
                Precondition::status(SessionStatus::Pending),
            )
            .await?;

        match outcome {
            UpdateOutcome::Applied(session) => {
                tracing::info!(
                    %code,
                    player = %player_name,
                    players = session.players.len(),
                    "player joined"
                );
                Ok(session)
            }
            UpdateOutcome::PreconditionFailed(_) => {
                Err(LobbyError::InvalidState(ALREADY_STARTED.into()))
            }
            UpdateOutcome::Missing => Err(LobbyError::NotFound(code)),
        }
    }

    /// Starts the round: picks the word, assigns roles, flips the status.
    ///
    /// The commit is conditional on the session still being `Pending` at
    /// the version that was read. Of two concurrent starts exactly one
    /// commits; the other re-reads, sees `Started` and gets
    /// [`LobbyError::InvalidState`]. A join that slips in between the
    /// read and the commit only bumps the version, so the start is
    /// recomputed with the new player included.
    pub async fn start(&self, code: &str) -> Result<Session, LobbyError> {
        let code = validate_code(code)?;
        let budget = self.config.start_retry_budget.max(1);

        for attempt in 1..=budget {
            let current = self
                .store
                .get(&code)
                .await?
                .ok_or_else(|| LobbyError::NotFound(code.clone()))?;

            if current.is_started() {
                return Err(LobbyError::InvalidState(ALREADY_STARTED.into()));
            }
            if current.players.len() < self.config.min_players {
                return Err(LobbyError::InvalidState(format!(
                    "not enough players: need at least {}, have {}",
                    self.config.min_players,
                    current.players.len()
                )));
            }

            let (players, word) = self.draw_round(&current.players);
            let guard = Precondition::status(SessionStatus::Pending).and_version(current.version);

            match self
                .store
                .conditional_update(&code, guard, SessionUpdate::start(players, word))
                .await?
            {
                UpdateOutcome::Applied(session) => {
                    tracing::info!(%code, players = session.players.len(), "session started");
                    return Ok(session);
                }
                UpdateOutcome::PreconditionFailed(latest) if latest.is_started() => {
                    return Err(LobbyError::InvalidState(ALREADY_STARTED.into()));
                }
                UpdateOutcome::PreconditionFailed(_) => {
                    tracing::debug!(%code, attempt, "roster changed during start, retrying");
                }
                UpdateOutcome::Missing => return Err(LobbyError::NotFound(code)),
            }
        }

        tracing::warn!(%code, "start gave up after repeated contention");
        Err(StoreError::Contention {
            code,
            attempts: budget,
        }
        .into())
    }

    /// Reads the latest committed state of a session.
    pub async fn snapshot(&self, code: &str) -> Result<Session, LobbyError> {
        let code = validate_code(code)?;
        let session = self.store.get(&code).await?;
        session.ok_or(LobbyError::NotFound(code))
    }

    /// Reads a session and projects it for `player_name`.
    pub async fn view(&self, code: &str, player_name: &str) -> Result<SessionView, LobbyError> {
        let session = self.snapshot(code).await?;
        Ok(self.project(&session, player_name))
    }

    /// Projects an already-read session using this lobby's saboteur text.
    pub fn project(&self, session: &Session, player_name: &str) -> SessionView {
        project(session, player_name.trim(), &self.config.saboteur_instruction)
    }

    fn validate_name<'a>(&self, name: &'a str) -> Result<&'a str, LobbyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LobbyError::Validation("player name must not be empty".into()));
        }
        if name.chars().count() > self.config.max_name_len {
            return Err(LobbyError::Validation(format!(
                "player name must be at most {} characters",
                self.config.max_name_len
            )));
        }
        Ok(name)
    }

    fn draw_code(&self) -> SessionCode {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generate_code(&mut *rng)
    }

    fn draw_round(&self, players: &[Player]) -> (Vec<Player>, String) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let word = self.words.pick_word(&mut *rng);
        let players = assign_roles(players, &mut *rng);
        (players, word)
    }
}

fn validate_code(code: &str) -> Result<SessionCode, LobbyError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(LobbyError::Validation("session code must not be empty".into()));
    }
    Ok(SessionCode::new(code))
}

#[cfg(test)]
mod tests {
    use wordmafia_protocol::Role;
    use wordmafia_store::MemoryStore;

    use super::*;
    use crate::StaticWordPool;

    fn manager(seed: u64) -> LobbyManager<MemoryStore, StaticWordPool> {
        LobbyManager::with_rng(
            MemoryStore::new(),
            StaticWordPool::default(),
            LobbyConfig::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    #[tokio::test]
    async fn test_create_trims_host_name() {
        let lobby = manager(1);
        let session = lobby.create("  Alice ").await.unwrap();

        assert!(session.code.is_well_formed());
        assert_eq!(session.players, vec![Player::host("Alice")]);
        assert_eq!(session.status, SessionStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_host() {
        let lobby = manager(1);
        let result = lobby.create("   ").await;
        assert!(matches!(result, Err(LobbyError::Validation(_))));
        assert!(lobby.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_join_blank_code_is_validation_error() {
        let lobby = manager(1);
        let result = lobby.join(" ", "Bob").await;
        assert!(matches!(result, Err(LobbyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_name_length_counts_characters() {
        let lobby = manager(1);
        let name: String = "é".repeat(32);
        assert!(lobby.create(&name).await.is_ok(), "32 two-byte chars fit");

        let too_long: String = "é".repeat(33);
        let result = lobby.create(&too_long).await;
        assert!(matches!(result, Err(LobbyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_start_with_three_players_is_rejected() {
        let lobby = manager(4);
        let code = lobby.create("Alice").await.unwrap().code;
        lobby.join(code.as_str(), "Bob").await.unwrap();
        lobby.join(code.as_str(), "Cara").await.unwrap();

        let result = lobby.start(code.as_str()).await;
        assert!(matches!(result, Err(LobbyError::InvalidState(_))));

        let session = lobby.snapshot(code.as_str()).await.unwrap();
        assert_eq!(session.status, SessionStatus::Pending);
        assert!(session.players.iter().all(|p| p.role == Role::Unassigned));
    }

    #[tokio::test]
    async fn test_same_seed_same_round() {
        async fn play(seed: u64) -> Session {
            let lobby = manager(seed);
            let code = lobby.create("Alice").await.unwrap().code;
            for name in ["Bob", "Cara", "Dee"] {
                lobby.join(code.as_str(), name).await.unwrap();
            }
            lobby.start(code.as_str()).await.unwrap()
        }

        let a = play(77).await;
        let b = play(77).await;
        assert_eq!(a.code, b.code);
        assert_eq!(a.word, b.word);
        assert_eq!(a.players, b.players);
    }

    #[tokio::test]
    async fn test_view_projects_for_player() {
        let lobby = manager(8);
        let code = lobby.create("Alice").await.unwrap().code;
        for name in ["Bob", "Cara", "Dee"] {
            lobby.join(code.as_str(), name).await.unwrap();
        }
        let session = lobby.start(code.as_str()).await.unwrap();
        let regular = session
            .players
            .iter()
            .find(|p| p.role == Role::Regular)
            .unwrap();

        let view = lobby.view(code.as_str(), &regular.name).await.unwrap();
        assert_eq!(view.word(), session.word.as_deref());
    }
}
