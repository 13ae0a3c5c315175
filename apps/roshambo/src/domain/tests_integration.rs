// Full three-turn game driven purely through the state machine.

use uuid::Uuid;

use crate::domain::{Decision, Game, GameStatus, Player, TurnRecord};

#[test]
fn test_three_turn_game_end_to_end() {
    let human = Uuid::new_v4();
    let ai = Uuid::new_v4();
    let mut game = Game::new(3).unwrap();
    let mut ledger: Vec<TurnRecord> = Vec::new();

    game.add_player(Player::new(human, "Human")).unwrap();
    assert_eq!(game.status, GameStatus::WaitingToStart);
    game.add_player(Player::new(ai, "AI")).unwrap();
    assert_eq!(game.status, GameStatus::Playing);

    let script = [
        (Decision::Rock, Decision::Scissors, Some(human), (1, 0)),
        (Decision::Paper, Decision::Paper, None, (1, 0)),
        (Decision::Scissors, Decision::Rock, Some(ai), (1, 1)),
    ];

    for (i, (h, a, winner, (h_score, a_score))) in script.into_iter().enumerate() {
        game.set_decision(human, h).unwrap();
        game.set_decision(ai, a).unwrap();
        let record = game.finish_turn().unwrap();

        assert_eq!(record.turn_index, i as u32);
        assert_eq!(record.winner_id, winner);
        assert_eq!(game.player(human).unwrap().score, h_score);
        assert_eq!(game.player(ai).unwrap().score, a_score);
        assert_eq!(game.turn_index, i as u32 + 1);
        ledger.push(record);
    }

    assert_eq!(game.status, GameStatus::Finished);
    let indices: Vec<u32> = ledger.iter().map(|r| r.turn_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    let last = ledger.last().unwrap();
    assert_eq!(last.decision_of(human).unwrap().decision, Decision::Scissors);
    assert_eq!(last.decision_of(human).unwrap().score_after, 1);
    assert_eq!(last.decision_of(ai).unwrap().score_after, 1);
}
