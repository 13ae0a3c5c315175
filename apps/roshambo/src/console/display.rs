use std::collections::HashMap;
use std::fmt::Write;

use crate::domain::{Game, TurnRecord, UserId};

/// Player id to display name for one game.
pub fn names_of(game: &Game) -> HashMap<UserId, String> {
    game.players
        .iter()
        .map(|p| (p.user_id, p.name.clone()))
        .collect()
}

fn name_for(names: &HashMap<UserId, String>, id: UserId) -> String {
    names.get(&id).cloned().unwrap_or_else(|| id.to_string())
}

/// Render one finalized turn. Players are listed by name.
pub fn render_turn(record: &TurnRecord, names: &HashMap<UserId, String>) -> String {
    let mut lines: Vec<(String, String)> = record
        .decisions
        .iter()
        .map(|d| {
            let name = name_for(names, d.player_id);
            let line = format!("{name} threw {}. Score: {}.", d.decision, d.score_after);
            (name, line)
        })
        .collect();
    lines.sort();

    let mut out = String::new();
    let _ = writeln!(out, "Result after turn {}:", record.turn_index);
    for (_, line) in lines {
        let _ = writeln!(out, "{line}");
    }
    let winner = record
        .winner_id
        .map(|id| name_for(names, id))
        .unwrap_or_else(|| "-".to_string());
    let _ = write!(out, "Winner in this round: {winner}");
    out
}

/// Render a sequence of turns separated by blank lines.
pub fn render_turns(records: &[TurnRecord], names: &HashMap<UserId, String>) -> String {
    records
        .iter()
        .map(|r| render_turn(r, names))
        .collect::<Vec<_>>()
        .join("\n\n")
}
