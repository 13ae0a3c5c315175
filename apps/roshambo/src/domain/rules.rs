/// Roster capacity; the game starts once this many players joined.
pub const PLAYERS: usize = 2;

/// Points awarded to the winner of a single turn.
pub const POINTS_PER_WIN: u32 = 1;
