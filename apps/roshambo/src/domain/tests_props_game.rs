use proptest::prelude::*;

use crate::domain::{resolve, test_gens, test_prelude, GameStatus, Outcome};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Playing any sequence of turns keeps scores consistent with the ledger:
    /// total points equal decisive turns, the index advances once per turn and
    /// the game finishes exactly when the configured count is reached.
    #[test]
    fn prop_scores_match_decisive_turns(pairs in test_gens::turns(12)) {
        let turns_total = pairs.len() as u32;
        let (mut game, first, second) = test_gens::playing_game(turns_total);
        let mut decisive = 0u32;

        for (i, (a, b)) in pairs.iter().copied().enumerate() {
            prop_assert_eq!(game.status, GameStatus::Playing);
            game.set_decision(first, a).unwrap();
            game.set_decision(second, b).unwrap();
            let record = game.finish_turn().unwrap();

            prop_assert_eq!(record.turn_index, i as u32);
            prop_assert_eq!(game.turn_index, i as u32 + 1);
            prop_assert!(game.players.iter().all(|p| p.decision.is_none()));

            let expected_winner = match resolve(a, b) {
                Outcome::FirstWins => Some(first),
                Outcome::SecondWins => Some(second),
                Outcome::Tie => None,
            };
            prop_assert_eq!(record.winner_id, expected_winner);
            if expected_winner.is_some() {
                decisive += 1;
            }

            for info in &record.decisions {
                let player = game.player(info.player_id).unwrap();
                prop_assert_eq!(info.score_after, player.score);
            }
        }

        let total: u32 = game.players.iter().map(|p| p.score).sum();
        prop_assert_eq!(total, decisive);
        prop_assert_eq!(game.status, GameStatus::Finished);
        prop_assert!(game.turn_index <= game.turns_total);
    }

    /// The last decision set before finishing is the one that counts.
    #[test]
    fn prop_last_decision_wins(
        early in test_gens::decision(),
        late in test_gens::decision(),
        other in test_gens::decision(),
    ) {
        let (mut game, first, second) = test_gens::playing_game(1);
        game.set_decision(first, early).unwrap();
        game.set_decision(first, late).unwrap();
        game.set_decision(second, other).unwrap();

        let record = game.finish_turn().unwrap();
        prop_assert_eq!(record.decision_of(first).unwrap().decision, late);
    }
}
