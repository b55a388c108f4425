//! Event handling for Predscope.
//!
//! Terminal input is translated into [`Action`](crate::state::Action)s,
//! taking the focused field, the active view and any open modal into account.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
