//! Data factories for repository and service tests.

use roshambo::domain::{Game, Player, User};
use roshambo::{AppError, AppState};
use roshambo_test_support::unique_helpers::unique_login;
use uuid::Uuid;

/// A stored user with a unique login.
pub async fn create_user(state: &AppState, prefix: &str) -> Result<User, AppError> {
    Ok(state
        .users
        .insert(User::new(Uuid::new_v4(), unique_login(prefix)))
        .await?)
}

/// A stored game with `creator` seated and pointing at it, still waiting for
/// a second player.
pub async fn create_waiting_game(
    state: &AppState,
    creator: &User,
    turns_total: u32,
) -> Result<(Game, User), AppError> {
    let mut game = Game::new(turns_total)?;
    game.add_player(Player::from(creator))?;
    let game = state.games.insert(game).await?;

    let mut creator = creator.clone();
    creator.enter_game(game.id);
    let creator = state.users.update(&creator).await?;
    Ok((game, creator))
}
