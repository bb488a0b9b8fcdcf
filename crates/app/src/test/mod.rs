//! Shared test fixtures.


pub(crate) use context::*;
