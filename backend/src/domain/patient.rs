//! Patient profile model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Clinical profile attached to a user with the Patient role.
///
/// At most one profile exists per user; the request layer rejects a second
/// profile for the same `user_id` with a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    pub id: Uuid,
    pub user_id: Uuid,
    pub age: Option<i32>,
    pub gender: Option<String>,
    #[schema(example = "O+")]
    pub blood_group: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
}

/// Input for creating a patient profile; the repository assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub user_id: Uuid,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
}
