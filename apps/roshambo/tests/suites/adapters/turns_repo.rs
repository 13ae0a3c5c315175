// Turn ledger behaviour shared by every adapter.

use roshambo::domain::{Decision, PlayerDecisionInfo, TurnRecord};
use roshambo::errors::domain::{ConflictKind, DomainError};
use roshambo::AppError;
use uuid::Uuid;

use crate::support::state::all_backends;

fn record(game_id: Uuid, turn_index: u32, a: Uuid, b: Uuid) -> TurnRecord {
    TurnRecord::new(
        game_id,
        turn_index,
        Some(a),
        vec![
            PlayerDecisionInfo {
                player_id: a,
                decision: Decision::Rock,
                score_after: turn_index + 1,
            },
            PlayerDecisionInfo {
                player_id: b,
                decision: Decision::Scissors,
                score_after: 0,
            },
        ],
    )
}

#[tokio::test]
async fn test_last_turns_reads_back_ascending() -> Result<(), AppError> {
    for (backend, state) in all_backends().await? {
        let game_id = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let written: Vec<_> = (0..3).map(|i| record(game_id, i, a, b)).collect();
        for r in &written {
            state.turns.insert(r).await?;
        }

        let read = state.turns.last_turns(game_id, 5).await?;
        assert_eq!(read, written, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_last_turns_keeps_newest_only() -> Result<(), AppError> {
    for (backend, state) in all_backends().await? {
        let game_id = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        // insertion order must not matter
        for i in [4, 0, 6, 2, 1, 5, 3] {
            state.turns.insert(&record(game_id, i, a, b)).await?;
        }

        let read = state.turns.last_turns(game_id, 3).await?;
        let indices: Vec<u32> = read.iter().map(|r| r.turn_index).collect();
        assert_eq!(indices, vec![4, 5, 6], "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_last_turns_is_scoped_per_game() -> Result<(), AppError> {
    for (backend, state) in all_backends().await? {
        let (g1, g2) = (Uuid::new_v4(), Uuid::new_v4());
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        state.turns.insert(&record(g1, 0, a, b)).await?;
        state.turns.insert(&record(g2, 0, a, b)).await?;
        state.turns.insert(&record(g2, 1, a, b)).await?;

        assert_eq!(state.turns.last_turns(g1, 5).await?.len(), 1, "{backend}");
        assert_eq!(state.turns.last_turns(g2, 5).await?.len(), 2, "{backend}");
        assert!(state
            .turns
            .last_turns(Uuid::new_v4(), 5)
            .await?
            .is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn test_tie_record_keeps_absent_winner() -> Result<(), AppError> {
    for (backend, state) in all_backends().await? {
        let game_id = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let tie = TurnRecord {
            winner_id: None,
            ..record(game_id, 0, a, b)
        };
        state.turns.insert(&tie).await?;

        let read = state.turns.last_turns(game_id, 1).await?;
        assert_eq!(read, vec![tie], "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_same_turn_twice_conflicts() -> Result<(), AppError> {
    for (backend, state) in all_backends().await? {
        let game_id = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        state.turns.insert(&record(game_id, 0, a, b)).await?;

        let err = state
            .turns
            .insert(&record(game_id, 0, a, b))
            .await
            .unwrap_err();
        assert!(
            matches!(err, DomainError::Conflict(ConflictKind::DuplicateTurn, _)),
            "{backend}: got {err:?}"
        );
        assert_eq!(state.turns.last_turns(game_id, 5).await?.len(), 1, "{backend}");
    }
    Ok(())
}
