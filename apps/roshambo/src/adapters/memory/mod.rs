//! Process-local adapters. Everything is lost when the process exits.

mod games;
mod turns;
mod users;

pub use games::GameRepoMemory;
pub use turns::TurnRepoMemory;
pub use users::UserRepoMemory;
