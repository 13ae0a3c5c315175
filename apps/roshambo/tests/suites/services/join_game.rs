// Joining through the game service: membership rules and pointer updates.

use roshambo::domain::GameStatus;
use roshambo::errors::domain::{DomainError, NotFoundKind};
use roshambo::services::games::GameService;
use roshambo::AppError;
use uuid::Uuid;

use crate::support::factory::{create_user, create_waiting_game};
use crate::support::state::all_backends;

#[tokio::test]
async fn test_join_seats_second_player_and_starts() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let creator = create_user(&state, "creator").await?;
        let joiner = create_user(&state, "joiner").await?;
        let (game, _) = create_waiting_game(&state, &creator, 3).await?;

        assert!(service.join_game(&state, game.id, &joiner).await?, "{backend}");

        let stored = state.games.find_by_id(game.id).await?.unwrap();
        assert_eq!(stored.status, GameStatus::Playing, "{backend}");
        assert!(stored.has_player(joiner.id), "{backend}");

        let joiner = state.users.find_by_id(joiner.id).await?.unwrap();
        assert_eq!(joiner.current_game_id, Some(game.id), "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_member_joining_again_is_success() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let creator = create_user(&state, "creator").await?;
        let (game, creator) = create_waiting_game(&state, &creator, 3).await?;

        assert!(service.try_join_game(&state, &game, &creator).await?, "{backend}");

        let stored = state.games.find_by_id(game.id).await?.unwrap();
        assert_eq!(stored.players.len(), 1, "{backend}");
        assert_eq!(stored.version, game.version, "{backend}: nothing written");
    }
    Ok(())
}

#[tokio::test]
async fn test_user_in_another_game_cannot_join() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let first = create_user(&state, "first").await?;
        let second = create_user(&state, "second").await?;
        let (game, _) = create_waiting_game(&state, &first, 3).await?;
        let (_, second) = create_waiting_game(&state, &second, 3).await?;

        assert!(!service.join_game(&state, game.id, &second).await?, "{backend}");
        let stored = state.games.find_by_id(game.id).await?.unwrap();
        assert!(!stored.has_player(second.id), "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_full_game_cannot_be_joined() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let creator = create_user(&state, "creator").await?;
        let joiner = create_user(&state, "joiner").await?;
        let late = create_user(&state, "late").await?;
        let (game, _) = create_waiting_game(&state, &creator, 3).await?;
        assert!(service.join_game(&state, game.id, &joiner).await?);

        assert!(!service.join_game(&state, game.id, &late).await?, "{backend}");

        let late = state.users.find_by_id(late.id).await?.unwrap();
        assert_eq!(late.current_game_id, None, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_join_unknown_game_is_not_found() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let joiner = create_user(&state, "joiner").await?;
        let err = service
            .join_game(&state, Uuid::new_v4(), &joiner)
            .await
            .unwrap_err();
        assert!(
            matches!(err, DomainError::NotFound(NotFoundKind::Game, _)),
            "{backend}: got {err:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_stale_copy_is_refreshed_by_join_game() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let creator = create_user(&state, "creator").await?;
        let joiner = create_user(&state, "joiner").await?;
        let (game, _) = create_waiting_game(&state, &creator, 3).await?;

        // bump the stored version behind the caller's back
        state.games.update(&game).await?;

        assert!(
            !service.try_join_game(&state, &game, &joiner).await?,
            "{backend}: stale copy loses"
        );
        assert!(
            service.join_game(&state, game.id, &joiner).await?,
            "{backend}: re-read copy wins"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_pointer_to_ended_game_is_released_on_join() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let creator = create_user(&state, "creator").await?;
        let joiner = create_user(&state, "joiner").await?;
        let (mut old, joiner) = create_waiting_game(&state, &joiner, 3).await?;
        old.cancel()?;
        state.games.update(&old).await?;
        let (game, _) = create_waiting_game(&state, &creator, 3).await?;

        assert!(service.join_game(&state, game.id, &joiner).await?, "{backend}");
        let joiner = state.users.find_by_id(joiner.id).await?.unwrap();
        assert_eq!(joiner.current_game_id, Some(game.id), "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_pointer_to_missing_game_is_released_on_join() -> Result<(), AppError> {
    let service = GameService::new();
    for (backend, state) in all_backends().await? {
        let creator = create_user(&state, "creator").await?;
        let mut joiner = create_user(&state, "joiner").await?;
        joiner.enter_game(Uuid::new_v4());
        let joiner = state.users.update(&joiner).await?;
        let (game, _) = create_waiting_game(&state, &creator, 3).await?;

        assert!(service.try_join_game(&state, &game, &joiner).await?, "{backend}");
        let stored = state.games.find_by_id(game.id).await?.unwrap();
        assert!(stored.has_player(joiner.id), "{backend}");
    }
    Ok(())
}
