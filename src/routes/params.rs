use serde::Deserialize;
use utoipa::ToSchema;

// Ownership scoping filters. These are advisory string-equality matches on
// caller-supplied emails, not an authorization mechanism.

#[derive(Debug, Deserialize, ToSchema)]
pub struct OwnerQuery {
    pub owner: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ManagedByQuery {
    pub managed_by: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatedByQuery {
    pub created_by: Option<String>,
}
