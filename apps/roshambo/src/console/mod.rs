//! Console front-end: reading the human's choices and rendering turn history.

pub mod display;
pub mod input;

pub use display::{names_of, render_turn, render_turns};
pub use input::{parse_decision, HumanInput, MenuChoice, StdinInput};
