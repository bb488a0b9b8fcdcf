//! Bastion Domain Concerns

pub mod organizations;
pub mod validation;
