//! Storage adapters implementing the repository traits.

pub mod games_sea;
pub mod memory;
pub mod turns_sea;
pub mod users_sea;
