//! Authentication

mod claims;
mod context;
mod errors;
mod repository;
mod secret;
mod service;
mod token;

pub use claims::*;
pub use context::*;
pub use errors::*;
pub use repository::*;
pub use secret::*;
pub use service::*;
pub use token::*;
