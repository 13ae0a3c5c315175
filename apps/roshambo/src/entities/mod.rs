pub mod game_turns;
pub mod games;
pub mod users;

pub use game_turns::Entity as GameTurns;
pub use games::Entity as Games;
pub use users::Entity as Users;
