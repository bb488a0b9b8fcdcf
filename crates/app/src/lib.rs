//! Authentication, authorization and permission-checked actions for Bastion.

pub mod actions;
pub mod auth;
pub mod context;
pub mod domain;
pub mod policy;
pub mod store;

#[cfg(test)]
mod test;
