//! Completion client protocol definitions.
//!
//! A completion client wraps a single request/response call to an
//! external text-generation service.

mod request;
mod traits;

pub use request::*;
pub use traits::*;
