//! Turn orchestration: drives one human and one AI through a game.
//!
//! Every step re-reads the game from the directory, mutates it through the
//! state machine, appends finalized turns to the ledger, and writes the game
//! back. One orchestrator drives a given game; only the join is guarded.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::ai::AiPlayer;
use crate::config::game::GameConfig;
use crate::console::display::names_of;
use crate::console::HumanInput;
use crate::domain::{Game, GameId, GameStatus, TurnRecord, User, UserId};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::games::require_game;
use crate::repos::users::require_user;
use crate::services::games::GameService;
use crate::state::app_state::AppState;

pub const HUMAN_LOGIN: &str = "Human";
pub const AI_LOGIN: &str = "AI";

/// What happened in one step of the turn cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnStep {
    /// Decisions were applied; `record` is set when the turn finalized.
    Played { record: Option<TurnRecord> },
    /// The game had already ended; players were released.
    GameOver(GameStatus),
    /// The human withdrew. Nothing was written.
    Withdrawn,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Finished,
    Canceled,
    Withdrawn,
}

/// Summary handed back to the front-end once the session stops.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub game_id: GameId,
    pub outcome: SessionOutcome,
    pub last_turns: Vec<TurnRecord>,
    pub names: HashMap<UserId, String>,
}

/// The two participants and their shared game.
#[derive(Debug, Clone)]
pub struct Session {
    pub human: User,
    pub ai: User,
    pub game: Game,
}

/// Game flow service - composes the directory, the ledger and the players.
pub struct GameFlowService {
    games: GameService,
}

impl GameFlowService {
    pub fn new() -> Self {
        Self {
            games: GameService::new(),
        }
    }

    /// Resolve both users, resume the human's current game or start a new
    /// one, and seat the AI.
    ///
    /// `turns` skips asking the human for a turn count.
    pub async fn open_session(
        &self,
        state: &AppState,
        config: &GameConfig,
        input: &mut dyn HumanInput,
        turns: Option<u32>,
    ) -> Result<Session, AppError> {
        let human = state.users.get_or_create_by_login(HUMAN_LOGIN).await?;
        let ai = state.users.get_or_create_by_login(AI_LOGIN).await?;

        let (game, human) = match self.games.find_current_game(state, &human).await? {
            Some(game) => {
                info!(game_id = %game.id, status = %game.status, "resuming current game");
                (game, human)
            }
            None => {
                let turns_total = match turns {
                    Some(n) if n > 0 => n,
                    Some(_) => config.default_turns,
                    None => config.turns_or_default(&input.turns_total().await?),
                };
                self.games.start_new_game(state, &human, turns_total).await?
            }
        };

        if !self.games.join_game(state, game.id, &ai).await? {
            return Err(AppError::conflict(
                "AI_CANNOT_JOIN",
                format!("Can't add {AI_LOGIN} user to game {}", game.id),
            ));
        }

        let game = require_game(state.games.as_ref(), game.id).await?;
        let ai = require_user(state.users.as_ref(), ai.id).await?;
        Ok(Session { human, ai, game })
    }

    /// One step of the turn cycle for the game `human_id` is currently in.
    pub async fn play_turn(
        &self,
        state: &AppState,
        human_id: UserId,
        input: &mut dyn HumanInput,
        ai: &dyn AiPlayer,
    ) -> Result<TurnStep, AppError> {
        let mut game = self.current_game_of(state, human_id).await?;

        if game.status.is_terminal() {
            self.games.release_players(state, &game).await?;
            info!(game_id = %game.id, status = %game.status, "game over");
            return Ok(TurnStep::GameOver(game.status));
        }

        let Some(decision) = input.next_decision().await? else {
            info!(game_id = %game.id, user_id = %human_id, "human withdrew");
            return Ok(TurnStep::Withdrawn);
        };
        game.set_decision(human_id, decision)?;

        let opponent = game
            .players
            .iter()
            .map(|p| p.user_id)
            .find(|id| *id != human_id)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidTransition,
                    format!("game {} has no opponent", game.id),
                )
            })?;
        let ai_decision = ai.choose_decision(&game, opponent)?;
        game.set_decision(opponent, ai_decision)?;
        debug!(game_id = %game.id, %decision, %ai_decision, "decisions collected");

        let record = if game.have_all_decisions() {
            let record = game.finish_turn()?;
            let record = self.append_turn(state, &mut game, record).await?;
            info!(
                game_id = %game.id,
                turn_index = record.turn_index,
                winner_id = ?record.winner_id,
                "turn finalized"
            );
            Some(record)
        } else {
            None
        };

        let game = state.games.update(&game).await?;
        if game.is_finished() {
            info!(game_id = %game.id, turns = game.turn_index, "game finished");
        }
        Ok(TurnStep::Played { record })
    }

    /// Run the turn cycle for `session` until the game ends or the human
    /// withdraws, then collect the most recent turns for display.
    pub async fn run(
        &self,
        state: &AppState,
        config: &GameConfig,
        session: &Session,
        input: &mut dyn HumanInput,
        ai: &dyn AiPlayer,
    ) -> Result<SessionReport, AppError> {
        let outcome = loop {
            match self.play_turn(state, session.human.id, input, ai).await? {
                TurnStep::Played { .. } => continue,
                TurnStep::GameOver(GameStatus::Canceled) => break SessionOutcome::Canceled,
                TurnStep::GameOver(_) => break SessionOutcome::Finished,
                TurnStep::Withdrawn => break SessionOutcome::Withdrawn,
            }
        };

        let game = require_game(state.games.as_ref(), session.game.id).await?;
        let last_turns = state.turns.last_turns(game.id, config.last_turns).await?;
        Ok(SessionReport {
            game_id: game.id,
            outcome,
            last_turns,
            names: names_of(&game),
        })
    }

    /// Append `record` to the ledger. If the ledger already holds this turn
    /// (an earlier attempt recorded it but failed to save the game), the
    /// recorded result wins and `game` takes its scores.
    async fn append_turn(
        &self,
        state: &AppState,
        game: &mut Game,
        record: TurnRecord,
    ) -> Result<TurnRecord, DomainError> {
        let err = match state.turns.insert(&record).await {
            Ok(()) => return Ok(record),
            Err(err @ DomainError::Conflict(ConflictKind::DuplicateTurn, _)) => err,
            Err(err) => return Err(err),
        };
        let recorded = state
            .turns
            .last_turns(record.game_id, 1)
            .await?
            .into_iter()
            .find(|r| r.turn_index == record.turn_index);
        let Some(recorded) = recorded else {
            return Err(err);
        };
        warn!(
            game_id = %game.id,
            turn_index = recorded.turn_index,
            "turn already recorded, keeping ledger result"
        );
        game.apply_recorded_scores(&recorded);
        Ok(recorded)
    }

    async fn current_game_of(&self, state: &AppState, user_id: UserId) -> Result<Game, AppError> {
        let user = require_user(state.users.as_ref(), user_id).await?;
        let game_id = user.current_game_id.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::CurrentGame,
                format!("No current game for user {}", user.login),
            )
        })?;
        Ok(require_game(state.games.as_ref(), game_id).await?)
    }
}

impl Default for GameFlowService {
    fn default() -> Self {
        Self::new()
    }
}
