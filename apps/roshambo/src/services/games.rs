//! Game lifecycle services: starting, resuming, joining and leaving games.

use tracing::{debug, info, warn};

use crate::domain::{Game, GameId, GameStatus, Player, User};
use crate::errors::domain::DomainError;
use crate::repos::games::require_game;
use crate::state::app_state::AppState;

/// Game domain service.
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// Create a game with `creator` as its first player and point the
    /// creator at it. Returns the stored game and the updated user.
    pub async fn start_new_game(
        &self,
        state: &AppState,
        creator: &User,
        turns_total: u32,
    ) -> Result<(Game, User), DomainError> {
        let mut game = Game::new(turns_total)?;
        game.add_player(Player::from(creator))?;
        let game = state.games.insert(game).await?;

        let mut creator = creator.clone();
        creator.enter_game(game.id);
        let creator = state.users.update(&creator).await?;

        info!(game_id = %game.id, user_id = %creator.id, turns_total, "game created");
        Ok((game, creator))
    }

    /// The user's current game, if it can still be played.
    ///
    /// A dangling pointer or a Finished/Canceled game yields `None`.
    pub async fn find_current_game(
        &self,
        state: &AppState,
        user: &User,
    ) -> Result<Option<Game>, DomainError> {
        let Some(game_id) = user.current_game_id else {
            return Ok(None);
        };
        let Some(game) = state.games.find_by_id(game_id).await? else {
            warn!(user_id = %user.id, game_id = %game_id, "current game pointer is dangling");
            return Ok(None);
        };
        match game.status {
            GameStatus::WaitingToStart | GameStatus::Playing => Ok(Some(game)),
            GameStatus::Finished | GameStatus::Canceled => Ok(None),
        }
    }

    /// Try to add `user` to `game` through the directory's guarded write.
    ///
    /// Already being a member counts as success. A user seated in another
    /// live game, a game that is no longer waiting, or a lost race all yield
    /// `Ok(false)`. A pointer to a missing or ended game is cleared first.
    pub async fn try_join_game(
        &self,
        state: &AppState,
        game: &Game,
        user: &User,
    ) -> Result<bool, DomainError> {
        if user.is_in_game(game.id) && game.has_player(user.id) {
            return Ok(true);
        }
        let mut user = user.clone();
        if let Some(current) = user.current_game_id {
            if !self.release_stale_pointer(state, &mut user, current).await? {
                debug!(user_id = %user.id, game_id = %game.id, "user already in another game");
                return Ok(false);
            }
        }
        if !game.is_joinable() || game.has_player(user.id) {
            return Ok(false);
        }

        let mut joined = game.clone();
        joined.add_player(Player::from(&user))?;
        if !state.games.try_join_waiting_to_start(&joined).await? {
            info!(game_id = %game.id, user_id = %user.id, "join conflict");
            return Ok(false);
        }

        user.enter_game(game.id);
        state.users.update(&user).await?;

        info!(
            game_id = %game.id,
            user_id = %user.id,
            status = %joined.status,
            "player joined"
        );
        Ok(true)
    }

    /// Join by id, re-reading both records and retrying once if the first
    /// attempt lost a race.
    pub async fn join_game(
        &self,
        state: &AppState,
        game_id: GameId,
        user: &User,
    ) -> Result<bool, DomainError> {
        for attempt in 1..=2 {
            let game = require_game(state.games.as_ref(), game_id).await?;
            let user = state
                .users
                .find_by_id(user.id)
                .await?
                .unwrap_or_else(|| user.clone());
            if self.try_join_game(state, &game, &user).await? {
                return Ok(true);
            }
            debug!(game_id = %game_id, user_id = %user.id, attempt, "join attempt failed");
        }
        Ok(false)
    }

    /// Clear the current-game pointer of every player that still points at
    /// `game`. The game record is left as is.
    pub async fn release_players(&self, state: &AppState, game: &Game) -> Result<(), DomainError> {
        for player in &game.players {
            let Some(mut user) = state.users.find_by_id(player.user_id).await? else {
                continue;
            };
            if !user.is_in_game(game.id) {
                continue;
            }
            user.exit_game();
            state.users.update(&user).await?;
            debug!(game_id = %game.id, user_id = %user.id, "user left game");
        }
        Ok(())
    }

    /// Clear `user`'s pointer when it names a game that is gone, has ended,
    /// or no longer seats the user. Returns whether the user is now free.
    async fn release_stale_pointer(
        &self,
        state: &AppState,
        user: &mut User,
        current: GameId,
    ) -> Result<bool, DomainError> {
        let stale = match state.games.find_by_id(current).await? {
            None => true,
            Some(game) => game.status.is_terminal() || !game.has_player(user.id),
        };
        if !stale {
            return Ok(false);
        }
        user.exit_game();
        *user = state.users.update(user).await?;
        info!(user_id = %user.id, game_id = %current, "released stale current game pointer");
        Ok(true)
    }

    /// Cancel a game that has not finished yet and release its players.
    pub async fn cancel_game(&self, state: &AppState, game_id: GameId) -> Result<Game, DomainError> {
        let mut game = require_game(state.games.as_ref(), game_id).await?;
        game.cancel()?;
        let game = state.games.update(&game).await?;
        self.release_players(state, &game).await?;
        info!(game_id = %game.id, "game canceled");
        Ok(game)
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}
