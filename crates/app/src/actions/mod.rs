//! Permission-checked CRUD actions.

mod controller;
mod errors;
mod resource;

pub use controller::*;
pub use errors::*;
pub use resource::*;
