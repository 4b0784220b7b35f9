//! Role assignment: who is the saboteur?

use rand::Rng;
use rand::seq::SliceRandom;
use wordmafia_protocol::{Player, Role};

/// Shuffles `players` and tags the first one `Saboteur`, the rest `Regular`.
///
/// The returned list stays in the shuffled order, so once a session
/// starts its stored player order no longer matches join order. Clients
/// already cope with this; nothing else depends on the order.
///
/// Pure: the input is untouched and nothing is written anywhere. The
/// caller checks the minimum player count before calling.
pub fn assign_roles<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Vec<Player> {
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);

    shuffled
        .iter()
        .enumerate()
        .map(|(i, player)| {
            let role = if i == 0 { Role::Saboteur } else { Role::Regular };
            player.with_role(role)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn players(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| if i == 0 { Player::host(*n) } else { Player::new(*n) })
            .collect()
    }

    #[test]
    fn test_assign_roles_exactly_one_saboteur() {
        let mut rng = StdRng::seed_from_u64(3);
        let input = players(&["Alice", "Bob", "Cara", "Dee", "Eve"]);

        let assigned = assign_roles(&input, &mut rng);

        assert_eq!(assigned.len(), input.len());
        assert_eq!(assigned.iter().filter(|p| p.role == Role::Saboteur).count(), 1);
        assert_eq!(assigned.iter().filter(|p| p.role == Role::Regular).count(), 4);
        assert_eq!(assigned[0].role, Role::Saboteur);
    }

    #[test]
    fn test_assign_roles_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let input = players(&["Alice", "Bob", "Cara", "Dee"]);

        let assigned = assign_roles(&input, &mut rng);

        let mut before: Vec<_> = input.iter().map(|p| (&p.name, p.is_host)).collect();
        let mut after: Vec<_> = assigned.iter().map(|p| (&p.name, p.is_host)).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after, "same players, host flag preserved");
    }

    #[test]
    fn test_assign_roles_leaves_input_untouched() {
        let mut rng = StdRng::seed_from_u64(5);
        let input = players(&["Alice", "Bob", "Cara", "Dee"]);
        let copy = input.clone();

        let _ = assign_roles(&input, &mut rng);

        assert_eq!(input, copy);
    }

    #[test]
    fn test_assign_roles_every_player_can_be_saboteur() {
        // Rough uniformity check: over 4,000 draws each of 4 players
        // should be picked about 1,000 times.
        let mut rng = StdRng::seed_from_u64(2024);
        let input = players(&["Alice", "Bob", "Cara", "Dee"]);
        let mut tally: HashMap<String, usize> = HashMap::new();

        for _ in 0..4_000 {
            let assigned = assign_roles(&input, &mut rng);
            *tally.entry(assigned[0].name.clone()).or_default() += 1;
        }

        assert_eq!(tally.len(), 4);
        for (name, count) in &tally {
            assert!((800..=1_200).contains(count), "{name} picked {count} times");
        }
    }
}
