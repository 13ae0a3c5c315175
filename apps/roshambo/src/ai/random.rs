//! Random AI player: throws a uniformly random decision every turn.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer};
use crate::domain::{Decision, Game, UserId};

/// AI that picks uniformly among the three decisions.
///
/// Seeding makes the sequence reproducible, which the tests rely on.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";

    pub const fn name() -> &'static str {
        Self::NAME
    }

    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            StdRng::seed_from_u64(s)
        } else {
            StdRng::from_os_rng()
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_decision(&self, game: &Game, me: UserId) -> Result<Decision, AiError> {
        if !game.has_player(me) {
            return Err(AiError::NotSeated(me));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        Decision::ALL
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal("no decisions to choose from".into()))
    }
}
