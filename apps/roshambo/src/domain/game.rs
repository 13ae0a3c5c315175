//! Game state machine: roster, status transitions, decisions and turn finalization.
//!
//! Everything here is pure and synchronous. Operations mutate a caller-owned
//! [`Game`] and never touch storage; persisting the result (and the returned
//! [`TurnRecord`]) is the caller's job.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::decision::{resolve, Decision, Outcome};
use super::errors::GameError;
use super::rules::{PLAYERS, POINTS_PER_WIN};
use super::turn::{PlayerDecisionInfo, TurnRecord};
use super::user::User;
use super::{GameId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    WaitingToStart,
    Playing,
    Finished,
    Canceled,
}

impl GameStatus {
    /// Finished and Canceled games accept no further changes.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Finished | GameStatus::Canceled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::WaitingToStart => "WAITING_TO_START",
            GameStatus::Playing => "PLAYING",
            GameStatus::Finished => "FINISHED",
            GameStatus::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A participant embedded in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: UserId,
    pub name: String,
    pub score: u32,
    /// Pending decision for the current turn; cleared when the turn finishes.
    #[serde(rename = "pending_decision", default)]
    pub decision: Option<Decision>,
}

impl Player {
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            score: 0,
            decision: None,
        }
    }
}

impl From<&User> for Player {
    fn from(user: &User) -> Self {
        Player::new(user.id, user.login.clone())
    }
}

/// Game domain model.
///
/// `version` belongs to the storage layer: it starts at 1 on insert and every
/// write through a directory bumps it. The join guard compares against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub turns_total: u32,
    pub players: Vec<Player>,
    pub status: GameStatus,
    pub turn_index: u32,
    pub version: i32,
}

impl Game {
    /// Create a fresh game waiting for players.
    pub fn new(turns_total: u32) -> Result<Self, GameError> {
        Self::with_id(Uuid::new_v4(), turns_total)
    }

    pub fn with_id(id: GameId, turns_total: u32) -> Result<Self, GameError> {
        if turns_total == 0 {
            return Err(GameError::InvalidTurnsTotal { found: turns_total });
        }
        Ok(Self {
            id,
            turns_total,
            players: Vec::with_capacity(PLAYERS),
            status: GameStatus::WaitingToStart,
            turn_index: 0,
            version: 0,
        })
    }

    pub fn player(&self, user_id: UserId) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn has_player(&self, user_id: UserId) -> bool {
        self.player(user_id).is_some()
    }

    /// Whether another player could still be added right now.
    pub fn is_joinable(&self) -> bool {
        self.status == GameStatus::WaitingToStart && self.players.len() < PLAYERS
    }

    pub fn add_player(&mut self, player: Player) -> Result<(), GameError> {
        if self.status != GameStatus::WaitingToStart {
            return Err(GameError::invalid_transition(format!(
                "cannot add a player while game is {}",
                self.status
            )));
        }
        if self.players.len() >= PLAYERS {
            return Err(GameError::invalid_transition("roster is full"));
        }
        if self.has_player(player.user_id) {
            return Err(GameError::invalid_transition(format!(
                "player {} already joined",
                player.user_id
            )));
        }

        self.players.push(player);
        if self.players.len() == PLAYERS {
            self.status = GameStatus::Playing;
        }
        Ok(())
    }

    /// Record `decision` for the current turn. A later call before the turn is
    /// finished overwrites the earlier one.
    pub fn set_decision(&mut self, user_id: UserId, decision: Decision) -> Result<(), GameError> {
        let status = self.status;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or(GameError::unknown_player(user_id))?;
        if status != GameStatus::Playing {
            return Err(GameError::not_playing(status));
        }
        player.decision = Some(decision);
        Ok(())
    }

    pub fn have_all_decisions(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.decision.is_some())
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Score the current turn and advance.
    ///
    /// Returns the record to append to the turn ledger; the state machine does
    /// not persist anything itself.
    pub fn finish_turn(&mut self) -> Result<TurnRecord, GameError> {
        if !self.have_all_decisions() {
            return Err(GameError::IncompleteTurn {
                turn_index: self.turn_index,
                missing: self.missing_decisions(),
            });
        }
        if self.status != GameStatus::Playing {
            return Err(GameError::invalid_transition(format!(
                "cannot finish a turn while game is {}",
                self.status
            )));
        }

        let [first, second] = self.players.as_mut_slice() else {
            return Err(GameError::invalid_transition(format!(
                "turn needs exactly {PLAYERS} players"
            )));
        };
        let (Some(first_decision), Some(second_decision)) = (first.decision, second.decision)
        else {
            return Err(GameError::IncompleteTurn {
                turn_index: self.turn_index,
                missing: 1,
            });
        };

        let winner = match resolve(first_decision, second_decision) {
            Outcome::FirstWins => Some(&mut *first),
            Outcome::SecondWins => Some(&mut *second),
            Outcome::Tie => None,
        };
        let winner_id = winner.map(|p| {
            p.score += POINTS_PER_WIN;
            p.user_id
        });

        let decisions = [(&*first, first_decision), (&*second, second_decision)]
            .into_iter()
            .map(|(p, decision)| PlayerDecisionInfo {
                player_id: p.user_id,
                decision,
                score_after: p.score,
            })
            .collect();
        let record = TurnRecord::new(self.id, self.turn_index, winner_id, decisions);

        for player in self.players.iter_mut() {
            player.decision = None;
        }
        self.turn_index += 1;
        if self.turn_index >= self.turns_total {
            self.status = GameStatus::Finished;
        }

        debug!(
            game_id = %self.id,
            turn_index = record.turn_index,
            winner_id = ?record.winner_id,
            status = %self.status,
            "turn finished"
        );
        Ok(record)
    }

    /// Take the cumulative scores from an already recorded turn. Used when
    /// the ledger holds a turn the stored game never caught up with.
    pub fn apply_recorded_scores(&mut self, record: &TurnRecord) {
        for info in &record.decisions {
            if let Some(player) = self.players.iter_mut().find(|p| p.user_id == info.player_id) {
                player.score = info.score_after;
            }
        }
    }

    /// Abandon the game. Only WaitingToStart and Playing games can be canceled.
    pub fn cancel(&mut self) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::invalid_transition(format!(
                "cannot cancel a game that is {}",
                self.status
            )));
        }
        self.status = GameStatus::Canceled;
        for player in self.players.iter_mut() {
            player.decision = None;
        }
        Ok(())
    }

    fn missing_decisions(&self) -> usize {
        let missing = self.players.iter().filter(|p| p.decision.is_none()).count();
        missing + PLAYERS.saturating_sub(self.players.len())
    }
}
