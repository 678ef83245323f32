use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "emp1",
        "tenantId": "tenant-1",
        "firstName": "John",
        "lastName": "Doe",
        "email": "john.doe@example.com",
        "department": "Engineering",
        "status": "active"
    })
)]
pub struct Employee {
    #[schema(example = "emp1")]
    pub id: String,

    #[schema(example = "tenant-1")]
    pub tenant_id: String,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "john.doe@example.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "active")]
    pub status: String,
}

impl Employee {
    /// Name shown next to a pending request in the approval queue.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
