use std::env;

use crate::error::AppError;

pub const DEFAULT_TURNS: u32 = 5;
pub const DEFAULT_LAST_TURNS: u64 = 5;

/// Session settings for the console game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Turn count used when the requested one is not a positive integer
    pub default_turns: u32,
    /// How many recent turns the score display shows
    pub last_turns: u64,
    /// Seed for the AI; `None` draws from OS entropy
    pub ai_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_turns: DEFAULT_TURNS,
            last_turns: DEFAULT_LAST_TURNS,
            ai_seed: None,
        }
    }
}

impl GameConfig {
    /// Read `ROSHAMBO_DEFAULT_TURNS`, `ROSHAMBO_LAST_TURNS` and `ROSHAMBO_AI_SEED`.
    /// Unset variables keep their defaults; set but malformed ones are errors.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let default_turns = parse_var("ROSHAMBO_DEFAULT_TURNS")?.unwrap_or(defaults.default_turns);
        if default_turns == 0 {
            return Err(AppError::config(
                "ROSHAMBO_DEFAULT_TURNS must be positive".to_string(),
            ));
        }
        Ok(Self {
            default_turns,
            last_turns: parse_var("ROSHAMBO_LAST_TURNS")?.unwrap_or(defaults.last_turns),
            ai_seed: parse_var("ROSHAMBO_AI_SEED")?,
        })
    }

    /// Interpret a user-supplied turn count, falling back to the default for
    /// anything that is not a positive integer.
    pub fn turns_or_default(&self, raw: &str) -> u32 {
        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => self.default_turns,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' is malformed: '{raw}'"
            ))
        }),
        Err(_) => Ok(None),
    }
}
