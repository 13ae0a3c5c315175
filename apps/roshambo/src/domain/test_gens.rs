// Proptest generators for domain types.

use proptest::prelude::*;
use uuid::Uuid;

use crate::domain::{Decision, Game, Player};

/// Generate a random Decision
pub fn decision() -> impl Strategy<Value = Decision> {
    prop_oneof![
        Just(Decision::Rock),
        Just(Decision::Scissors),
        Just(Decision::Paper),
    ]
}

/// Generate a sequence of decision pairs, one per turn
pub fn turns(max: usize) -> impl Strategy<Value = Vec<(Decision, Decision)>> {
    prop::collection::vec((decision(), decision()), 1..=max)
}

/// A game with two players already joined, so it is Playing.
pub fn playing_game(turns_total: u32) -> (Game, Uuid, Uuid) {
    let mut game = Game::new(turns_total).expect("positive turns total");
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    game.add_player(Player::new(first, "first")).expect("first join");
    game.add_player(Player::new(second, "second")).expect("second join");
    (game, first, second)
}
