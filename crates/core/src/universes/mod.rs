//! Universe domain - snapshot models and provider traits.

mod universe_model;
mod universe_traits;

pub use universe_model::*;
pub use universe_traits::*;
