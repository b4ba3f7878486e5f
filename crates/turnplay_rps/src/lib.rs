//! Pure rock-paper-scissors rules.
//!
//! Two seats each submit a [`Choice`]; [`resolve`] decides the round by the
//! standard cyclic dominance relation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod choice;
mod outcome;

pub use choice::Choice;
pub use outcome::{Outcome, Seat, resolve};
