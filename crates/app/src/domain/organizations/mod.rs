//! Organizations

pub mod records;
mod repository;

pub use records::Organization;
pub use repository::*;

use crate::actions::ActionController;

/// Organization actions over any [`OrganizationStore`].
pub type OrganizationsController = ActionController<Organization, dyn OrganizationStore>;
