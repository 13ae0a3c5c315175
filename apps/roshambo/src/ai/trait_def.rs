//! AI player trait definition.

use std::fmt;

use crate::domain::{Decision, Game, UserId};
use crate::error::AppError;

#[derive(Debug)]
pub enum AiError {
    Internal(String),
    NotSeated(UserId),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::NotSeated(id) => write!(f, "AI player {id} is not part of the game"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::internal(format!("AI error: {err}"))
    }
}

/// Automated decision policy.
///
/// Implementations hold no per-game state that needs persisting; the game is
/// passed in read-only each turn.
pub trait AiPlayer: Send + Sync {
    fn choose_decision(&self, game: &Game, me: UserId) -> Result<Decision, AiError>;
}
