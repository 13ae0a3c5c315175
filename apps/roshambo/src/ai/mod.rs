//! AI player module: automated decision policies.
//!
//! This module provides:
//! - AI trait for different AI implementations
//! - RandomPlayer: uniform random decisions (seedable for tests)

mod random;
mod trait_def;

pub use random::RandomPlayer;
pub use trait_def::{AiError, AiPlayer};

/// Create an AI player from an ai_type string and optional seed.
///
/// Returns None if ai_type is unrecognized.
pub fn create_ai(ai_type: &str, seed: Option<u64>) -> Option<Box<dyn AiPlayer>> {
    match ai_type {
        "random" => Some(Box::new(RandomPlayer::new(seed))),
        _ => None,
    }
}
