use std::collections::HashMap;

use rom_cull_core::Entry;

use crate::dat::{DatFile, DatGame};

/// Default clone validity: keep clones whose description carries a
/// `Players` marker, signaling a variant with a different supported
/// player count.
pub fn players_variant(game: &DatGame) -> bool {
    game.description.contains("Players")
}

/// Re-assemble a filtered catalog from the selection winners.
///
/// For each winner the original game node is re-emitted, followed by the
/// other members of its clone group that satisfy `validity`. Clones are
/// never scored on their own; the predicate is their only filter. When
/// `manufacturer_filter` is set, winners (and their clones) from other
/// manufacturers are dropped after selection. The header envelope is
/// carried over unchanged.
pub fn project_catalog<F>(
    dat: &DatFile,
    winners: &[Entry],
    validity: F,
    manufacturer_filter: Option<&str>,
) -> DatFile
where
    F: Fn(&DatGame) -> bool,
{
    // Clone-group members by group key (the parent name).
    let mut members: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, game) in dat.games.iter().enumerate() {
        let key = game.clone_of.as_deref().unwrap_or(&game.name);
        members.entry(key).or_default().push(i);
    }

    let mut games = Vec::new();

    for winner in winners {
        let Some(index) = winner.handle else {
            log::warn!("winner {:?} has no catalog handle; dropped", winner.raw_name);
            continue;
        };
        let game = &dat.games[index];

        if let Some(filter) = manufacturer_filter {
            let matches = game
                .manufacturer
                .as_deref()
                .is_some_and(|m| m.eq_ignore_ascii_case(filter));
            if !matches {
                continue;
            }
        }

        games.push(game.clone());

        let key = game.clone_of.as_deref().unwrap_or(&game.name);
        for &i in members.get(key).into_iter().flatten() {
            if i == index {
                continue;
            }
            let clone = &dat.games[i];
            if validity(clone) {
                games.push(clone.clone());
            }
        }
    }

    DatFile {
        header: dat.header.clone(),
        games,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dat::DatHeader;
    use rom_cull_core::parse_entry;

    fn game(name: &str, description: &str, clone_of: Option<&str>) -> DatGame {
        DatGame {
            name: name.to_string(),
            description: description.to_string(),
            clone_of: clone_of.map(String::from),
            is_bios: false,
            year: None,
            manufacturer: Some("Acme".to_string()),
            roms: Vec::new(),
        }
    }

    fn catalog(games: Vec<DatGame>) -> DatFile {
        DatFile {
            header: DatHeader {
                name: "Set".to_string(),
                description: "Set".to_string(),
                version: "1".to_string(),
                ..Default::default()
            },
            games,
        }
    }

    #[test]
    fn winner_keeps_players_clone() {
        let dat = catalog(vec![
            game("Game", "Game", None),
            game("Game (4 Players)", "Game (4 Players)", Some("Game")),
        ]);
        let winner = parse_entry("Game").with_handle(0);

        let projected = project_catalog(&dat, &[winner], players_variant, None);
        let names: Vec<_> = projected.games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Game", "Game (4 Players)"]);
    }

    #[test]
    fn clone_without_marker_is_dropped() {
        let dat = catalog(vec![
            game("Game", "Game", None),
            game("Game (alt)", "Game (alternate)", Some("Game")),
        ]);
        let winner = parse_entry("Game").with_handle(0);

        let projected = project_catalog(&dat, &[winner], players_variant, None);
        let names: Vec<_> = projected.games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Game"]);
    }

    #[test]
    fn winning_clone_reattaches_its_group() {
        // The winner is itself a clone; its group key is the parent name.
        let dat = catalog(vec![
            game("Game", "Game", None),
            game("Game (USA)", "Game (USA)", Some("Game")),
            game("Game (2 Players)", "Game (2 Players)", Some("Game")),
        ]);
        let winner = parse_entry("Game (USA)").with_handle(1);

        let projected = project_catalog(&dat, &[winner], players_variant, None);
        let names: Vec<_> = projected.games.iter().map(|g| g.name.as_str()).collect();
        // The losing parent lacks the marker and is dropped; the Players
        // variant stays.
        assert_eq!(names, vec!["Game (USA)", "Game (2 Players)"]);
    }

    #[test]
    fn manufacturer_filter_drops_non_matching_winners() {
        let mut other = game("Other", "Other", None);
        other.manufacturer = Some("Rival".to_string());
        let dat = catalog(vec![game("Game", "Game", None), other]);

        let winners = vec![
            parse_entry("Game").with_handle(0),
            parse_entry("Other").with_handle(1),
        ];
        let projected = project_catalog(&dat, &winners, players_variant, Some("acme"));
        let names: Vec<_> = projected.games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Game"]);
    }

    #[test]
    fn header_envelope_is_preserved() {
        let dat = catalog(vec![game("Game", "Game", None)]);
        let projected = project_catalog(&dat, &[], players_variant, None);
        assert_eq!(projected.header.name, "Set");
        assert!(projected.games.is_empty());
    }
}
