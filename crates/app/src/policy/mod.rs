//! Rule-based authorization.

mod engine;
mod rules;

pub use engine::*;
pub use rules::*;
