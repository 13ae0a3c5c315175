//! Repository traits for the domain layer.
//!
//! Each trait has an in-memory implementation (`adapters::memory`) and a
//! SeaORM implementation (`adapters::*_sea`). Services only see the traits.

pub mod games;
pub mod turns;
pub mod users;

pub use games::GameRepo;
pub use turns::TurnRepo;
pub use users::{PageList, UserRepo};
