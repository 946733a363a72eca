//! Core domain types.

mod credential;
mod generation;
mod preferences;

pub use credential::*;
pub use generation::*;
pub use preferences::*;
