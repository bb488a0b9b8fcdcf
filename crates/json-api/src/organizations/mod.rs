//! Organizations

mod handlers;
pub(crate) mod models;

pub(crate) use handlers::*;

pub(crate) const RESOURCE: &str = "Organization";
