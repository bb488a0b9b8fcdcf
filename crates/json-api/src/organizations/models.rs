//! Organization payloads.

use bastion_app::domain::organizations::Organization;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Create Organization Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrganizationRequest {
    /// Lowercase name made of letters, digits, `/`, `_`, `.` and `-`
    pub name: String,

    pub description: Option<String>,
}

impl From<CreateOrganizationRequest> for Organization {
    fn from(request: CreateOrganizationRequest) -> Self {
        Organization {
            name: request.name,
            description: request.description,
        }
    }
}

/// Update Organization Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrganizationRequest {
    pub description: Option<String>,
}

impl UpdateOrganizationRequest {
    pub(crate) fn into_organization(self, name: String) -> Organization {
        Organization {
            name,
            description: self.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrganizationResponse {
    /// The unique name of the organization
    pub name: String,

    /// Free-form description
    pub description: Option<String>,
}

impl From<Organization> for OrganizationResponse {
    fn from(org: Organization) -> Self {
        OrganizationResponse {
            name: org.name,
            description: org.description,
        }
    }
}
