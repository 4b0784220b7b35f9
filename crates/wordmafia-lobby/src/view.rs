//! Projects a stored session into what one player may see.

use wordmafia_protocol::{
    PlayerSummary, Role, Secret, Session, SessionStatus, SessionView, ViewerRole,
};

/// Builds the view of `session` for the player named `viewer`.
///
/// While pending nobody has a role, so `role` and `secret` are both
/// absent. Once started:
///
/// | viewer            | role        | secret                   |
/// |-------------------|-------------|--------------------------|
/// | regular player    | `Regular`   | `Word(word)`             |
/// | the saboteur      | `Saboteur`  | `Instruction(instruction)` |
/// | not in session    | `Unknown`   | none                     |
///
/// The word never appears in a saboteur's or a stranger's view. Name
/// matching is exact; with duplicate names the first match wins.
pub fn project(session: &Session, viewer: &str, instruction: &str) -> SessionView {
    let players = session
        .players
        .iter()
        .map(|p| PlayerSummary {
            name: p.name.clone(),
            is_host: p.is_host,
        })
        .collect();

    let (role, secret) = match session.status {
        SessionStatus::Pending => (None, None),
        SessionStatus::Started => match session.player(viewer).map(|p| p.role) {
            Some(Role::Saboteur) => (
                Some(ViewerRole::Saboteur),
                Some(Secret::Instruction(instruction.to_string())),
            ),
            Some(Role::Regular) => (
                Some(ViewerRole::Regular),
                session.word.clone().map(Secret::Word),
            ),
            // Unassigned can't occur in a started session.
            Some(Role::Unassigned) | None => (Some(ViewerRole::Unknown), None),
        },
    };

    SessionView {
        code: session.code.clone(),
        status: session.status,
        players,
        role,
        secret,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use wordmafia_protocol::{Player, SessionCode};

    use super::*;

    const INSTRUCTION: &str = "blend in";

    fn started() -> Session {
        let mut session =
            Session::new(SessionCode::new("555-123"), Player::host("Alice"), Utc::now());
        session.players = vec![
            Player::new("Bob").with_role(Role::Saboteur),
            Player::host("Alice").with_role(Role::Regular),
            Player::new("Cara").with_role(Role::Regular),
            Player::new("Dee").with_role(Role::Regular),
        ];
        session.status = SessionStatus::Started;
        session.word = Some("cherry".into());
        session
    }

    #[test]
    fn test_project_pending_has_no_role_or_secret() {
        let mut session =
            Session::new(SessionCode::new("555-123"), Player::host("Alice"), Utc::now());
        session.players.push(Player::new("Bob"));

        let view = project(&session, "Alice", INSTRUCTION);

        assert_eq!(view.status, SessionStatus::Pending);
        assert_eq!(view.players.len(), 2);
        assert!(view.players[0].is_host);
        assert!(view.role.is_none());
        assert!(view.secret.is_none());
    }

    #[test]
    fn test_project_regular_sees_word() {
        let view = project(&started(), "Cara", INSTRUCTION);
        assert_eq!(view.role, Some(ViewerRole::Regular));
        assert_eq!(view.word(), Some("cherry"));
    }

    #[test]
    fn test_project_saboteur_gets_instruction_not_word() {
        let view = project(&started(), "Bob", INSTRUCTION);
        assert_eq!(view.role, Some(ViewerRole::Saboteur));
        assert_eq!(view.secret, Some(Secret::Instruction(INSTRUCTION.into())));
        assert!(view.word().is_none());
    }

    #[test]
    fn test_project_unknown_viewer_gets_nothing_secret() {
        let view = project(&started(), "Mallory", INSTRUCTION);
        assert_eq!(view.role, Some(ViewerRole::Unknown));
        assert!(view.secret.is_none());
        assert_eq!(view.players.len(), 4, "roster is still visible");
    }

    #[test]
    fn test_project_name_match_is_case_sensitive() {
        let view = project(&started(), "cara", INSTRUCTION);
        assert_eq!(view.role, Some(ViewerRole::Unknown));
    }

    #[test]
    fn test_project_preserves_stored_order() {
        let view = project(&started(), "Alice", INSTRUCTION);
        let names: Vec<_> = view.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Alice", "Cara", "Dee"]);
    }
}
