//! Error types for the Slightly Warmer protocol layer.

mod generation;
mod provider;
mod relay;
mod store;
mod validation;

pub use generation::*;
pub use provider::*;
pub use relay::*;
pub use store::*;
pub use validation::*;
