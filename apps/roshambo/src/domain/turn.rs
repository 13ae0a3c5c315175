use serde::{Deserialize, Serialize};

use super::{Decision, GameId, UserId};

/// One player's line in a finalized turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDecisionInfo {
    pub player_id: UserId,
    pub decision: Decision,
    /// Cumulative score of the player once this turn was scored.
    pub score_after: u32,
}

/// Immutable snapshot of a finalized turn, appended to the turn ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub game_id: GameId,
    pub turn_index: u32,
    pub decisions: Vec<PlayerDecisionInfo>,
    /// `None` when the turn was a tie.
    pub winner_id: Option<UserId>,
}

impl TurnRecord {
    pub fn new(
        game_id: GameId,
        turn_index: u32,
        winner_id: Option<UserId>,
        decisions: Vec<PlayerDecisionInfo>,
    ) -> Self {
        Self {
            game_id,
            turn_index,
            decisions,
            winner_id,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winner_id.is_none()
    }

    pub fn decision_of(&self, player_id: UserId) -> Option<&PlayerDecisionInfo> {
        self.decisions.iter().find(|d| d.player_id == player_id)
    }
}
