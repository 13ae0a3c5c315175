use serde::{Deserialize, Serialize};

use super::{GameId, UserId};

/// Account record owned by the user store. The game core only reads and
/// writes the `current_game_id` pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub login: String,
    pub current_game_id: Option<GameId>,
}

impl User {
    pub fn new(id: UserId, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            current_game_id: None,
        }
    }

    pub fn enter_game(&mut self, game_id: GameId) {
        self.current_game_id = Some(game_id);
    }

    /// Drop the pointer to the current game. The game itself is untouched.
    pub fn exit_game(&mut self) {
        self.current_game_id = None;
    }

    pub fn is_in_game(&self, game_id: GameId) -> bool {
        self.current_game_id == Some(game_id)
    }
}
