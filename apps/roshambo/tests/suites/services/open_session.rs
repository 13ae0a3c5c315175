// Session setup: user resolution, resume-or-create and seating the AI.

use roshambo::domain::{Decision, GameStatus};
use roshambo::services::game_flow::{GameFlowService, AI_LOGIN, HUMAN_LOGIN};
use roshambo::services::games::GameService;
use roshambo::{AppError, GameConfig};

use crate::support::factory::{create_user, create_waiting_game};
use crate::support::players::ScriptedInput;
use crate::support::state::all_backends;

#[tokio::test]
async fn test_new_session_asks_for_turns() -> Result<(), AppError> {
    let flow = GameFlowService::new();
    let config = GameConfig::default();
    for (backend, state) in all_backends().await? {
        let mut input = ScriptedInput::new([]).answering_turns("4");
        let session = flow.open_session(&state, &config, &mut input, None).await?;

        assert_eq!(input.turns_asked, 1, "{backend}");
        assert_eq!(session.game.turns_total, 4, "{backend}");
        assert_eq!(session.game.status, GameStatus::Playing, "{backend}");
        assert_eq!(session.human.login, HUMAN_LOGIN, "{backend}");
        assert_eq!(session.ai.login, AI_LOGIN, "{backend}");
        assert_eq!(session.human.current_game_id, Some(session.game.id), "{backend}");
        assert_eq!(session.ai.current_game_id, Some(session.game.id), "{backend}");
        // creator moves first
        assert_eq!(session.game.players[0].user_id, session.human.id, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_unusable_answer_falls_back_to_default() -> Result<(), AppError> {
    let flow = GameFlowService::new();
    let config = GameConfig {
        default_turns: 7,
        ..GameConfig::default()
    };
    for (backend, state) in all_backends().await? {
        let mut input = ScriptedInput::new([]).answering_turns("lots");
        let session = flow.open_session(&state, &config, &mut input, None).await?;
        assert_eq!(session.game.turns_total, 7, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_explicit_turns_skip_the_prompt() -> Result<(), AppError> {
    let flow = GameFlowService::new();
    let config = GameConfig::default();
    for (backend, state) in all_backends().await? {
        let mut input = ScriptedInput::new([]);
        let session = flow
            .open_session(&state, &config, &mut input, Some(2))
            .await?;
        assert_eq!(input.turns_asked, 0, "{backend}");
        assert_eq!(session.game.turns_total, 2, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_current_game_is_resumed() -> Result<(), AppError> {
    let flow = GameFlowService::new();
    let config = GameConfig::default();
    for (backend, state) in all_backends().await? {
        let mut input = ScriptedInput::new([]);
        let first = flow
            .open_session(&state, &config, &mut input, Some(3))
            .await?;

        let mut input = ScriptedInput::new([]).answering_turns("9");
        let second = flow.open_session(&state, &config, &mut input, None).await?;

        assert_eq!(second.game.id, first.game.id, "{backend}");
        assert_eq!(second.game.turns_total, 3, "{backend}");
        assert_eq!(input.turns_asked, 0, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_ended_game_is_not_resumed() -> Result<(), AppError> {
    let flow = GameFlowService::new();
    let config = GameConfig::default();
    for (backend, state) in all_backends().await? {
        let mut input = ScriptedInput::new([]);
        let first = flow
            .open_session(&state, &config, &mut input, Some(3))
            .await?;

        // cancel and free only the AI so the human still points at it
        let mut game = first.game.clone();
        game.cancel()?;
        state.games.update(&game).await?;
        let mut ai = first.ai.clone();
        ai.exit_game();
        state.users.update(&ai).await?;

        let second = flow
            .open_session(&state, &config, &mut input, Some(3))
            .await?;
        assert_ne!(second.game.id, first.game.id, "{backend}");
        assert_eq!(second.game.status, GameStatus::Playing, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_busy_ai_fails_the_session() -> Result<(), AppError> {
    let flow = GameFlowService::new();
    let config = GameConfig::default();
    for (backend, state) in all_backends().await? {
        let ai = state.users.get_or_create_by_login(AI_LOGIN).await?;
        let (_, _) = create_waiting_game(&state, &ai, 3).await?;

        let mut input = ScriptedInput::new([]);
        let err = flow
            .open_session(&state, &config, &mut input, Some(3))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "AI_CANNOT_JOIN", "{backend}: got {err:?}");

        // the human's new game stays open for a later attempt
        let human = state.users.get_or_create_by_login(HUMAN_LOGIN).await?;
        let current = GameService::new().find_current_game(&state, &human).await?;
        assert_eq!(
            current.map(|g| g.status),
            Some(GameStatus::WaitingToStart),
            "{backend}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_other_users_do_not_disturb_setup() -> Result<(), AppError> {
    let flow = GameFlowService::new();
    let config = GameConfig::default();
    for (backend, state) in all_backends().await? {
        let stranger = create_user(&state, "stranger").await?;
        create_waiting_game(&state, &stranger, 3).await?;

        let mut input = ScriptedInput::new([]);
        let session = flow
            .open_session(&state, &config, &mut input, Some(1))
            .await?;
        assert!(!session.game.has_player(stranger.id), "{backend}");
        assert_eq!(session.game.players.len(), 2, "{backend}");
    }
    Ok(())
}

#[tokio::test]
async fn test_ai_left_in_finished_game_is_seated_again() -> Result<(), AppError> {
    let flow = GameFlowService::new();
    let config = GameConfig::default();
    for (backend, state) in all_backends().await? {
        let mut input = ScriptedInput::new([]);
        let first = flow
            .open_session(&state, &config, &mut input, Some(1))
            .await?;

        // the game ended but nobody released the players
        let mut game = first.game.clone();
        game.set_decision(first.human.id, Decision::Rock)?;
        game.set_decision(first.ai.id, Decision::Paper)?;
        game.finish_turn()?;
        state.games.update(&game).await?;

        let second = flow
            .open_session(&state, &config, &mut input, Some(1))
            .await?;
        assert_ne!(second.game.id, first.game.id, "{backend}");
        assert_eq!(second.ai.current_game_id, Some(second.game.id), "{backend}");
        assert_eq!(second.game.status, GameStatus::Playing, "{backend}");
    }
    Ok(())
}
