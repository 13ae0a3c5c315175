// Cancellation and pointer release.

use roshambo::domain::{Decision, GameStatus};
use roshambo::errors::domain::{DomainError, ValidationKind};
use roshambo::services::games::GameService;
use roshambo::AppError;

use crate::support::factory::{create_user, create_waiting_game};
use crate::support::state::all_backends;

#[tokio::test]
async fn test_cancel_releases_every_player() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let creator = create_user(&state, "creator").await?;
        let joiner = create_user(&state, "joiner").await?;
        let (game, _) = create_waiting_game(&state, &creator, 3).await?;
        service.join_game(&state, game.id, &joiner).await?;

        let canceled = service.cancel_game(&state, game.id).await?;
        assert_eq!(canceled.status, GameStatus::Canceled, "{backend}");

        for id in [creator.id, joiner.id] {
            let user = state.users.find_by_id(id).await?.unwrap();
            assert_eq!(user.current_game_id, None, "{backend}");
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_cancel_drops_pending_decisions() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let creator = create_user(&state, "creator").await?;
        let joiner = create_user(&state, "joiner").await?;
        let (game, _) = create_waiting_game(&state, &creator, 3).await?;
        service.join_game(&state, game.id, &joiner).await?;

        let mut game = state.games.find_by_id(game.id).await?.unwrap();
        game.set_decision(creator.id, Decision::Rock)?;
        state.games.update(&game).await?;

        let canceled = service.cancel_game(&state, game.id).await?;
        assert!(
            canceled.players.iter().all(|p| p.decision.is_none()),
            "{backend}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_cancel_twice_is_invalid() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let creator = create_user(&state, "creator").await?;
        let (game, _) = create_waiting_game(&state, &creator, 3).await?;
        service.cancel_game(&state, game.id).await?;

        let err = service.cancel_game(&state, game.id).await.unwrap_err();
        assert!(
            matches!(err, DomainError::Validation(ValidationKind::InvalidTransition, _)),
            "{backend}: got {err:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_release_skips_users_elsewhere() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let creator = create_user(&state, "creator").await?;
        let (game, mut creator) = create_waiting_game(&state, &creator, 3).await?;

        // the creator has moved on to some other game
        let elsewhere = uuid::Uuid::new_v4();
        creator.enter_game(elsewhere);
        state.users.update(&creator).await?;

        service.release_players(&state, &game).await?;
        let stored = state.users.find_by_id(creator.id).await?.unwrap();
        assert_eq!(stored.current_game_id, Some(elsewhere), "{backend}");
    }
    Ok(())
}
