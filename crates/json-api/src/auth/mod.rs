//! Authentication

mod errors;
pub(crate) mod middleware;
pub(crate) mod refresh;

pub(crate) use errors::*;
