use super::game::GameStatus;
use super::UserId;

/// Contract violations raised by the game state machine.
///
/// Callers are expected to check preconditions through the boolean queries on
/// [`Game`](super::Game) first, so any of these surfacing means a bug in the caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid transition: {reason}")]
    InvalidTransition { reason: String },
    #[error("player {player_id} is not part of this game")]
    UnknownPlayer { player_id: UserId },
    #[error("decisions are only accepted while playing (status: {status})")]
    NotPlaying { status: GameStatus },
    #[error("turn {turn_index} is missing {missing} decision(s)")]
    IncompleteTurn { turn_index: u32, missing: usize },
    #[error("total turns must be positive (found: {found})")]
    InvalidTurnsTotal { found: u32 },
}

impl GameError {
    pub fn invalid_transition(reason: impl Into<String>) -> Self {
        Self::InvalidTransition {
            reason: reason.into(),
        }
    }

    pub fn unknown_player(player_id: UserId) -> Self {
        Self::UnknownPlayer { player_id }
    }

    pub fn not_playing(status: GameStatus) -> Self {
        Self::NotPlaying { status }
    }
}
