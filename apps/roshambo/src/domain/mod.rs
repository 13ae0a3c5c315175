//! Domain layer: pure game logic types and helpers.

pub mod decision;
pub mod errors;
pub mod game;
pub mod rules;
pub mod turn;
pub mod user;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_integration;
#[cfg(test)]
mod tests_props_game;

/// Opaque game identity (random v4).
pub type GameId = uuid::Uuid;
/// Opaque user identity (random v4).
pub type UserId = uuid::Uuid;

// Re-exports for ergonomics
pub use decision::{resolve, Decision, Outcome};
pub use errors::GameError;
pub use game::{Game, GameStatus, Player};
pub use turn::{PlayerDecisionInfo, TurnRecord};
pub use user::User;
