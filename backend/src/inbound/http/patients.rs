//! Patient profile handlers.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, NewPatient, Patient};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /patients`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatePatientRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub medical_history: Option<String>,
}

/// Create the patient profile for an existing user.
///
/// The referenced user must exist and must not already have a profile; both
/// checks are reads against the repositories before the write.
#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientRequest,
    responses(
        (status = 200, description = "Profile created", body = Patient),
        (status = 400, description = "Profile already exists", body = ApiError),
        (status = 404, description = "User not found", body = ApiError)
    ),
    tags = ["patients"]
)]
#[post("/patients")]
pub async fn create_patient(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePatientRequest>,
) -> ApiResult<web::Json<Patient>> {
    let payload = payload.into_inner();

    if state.users.find_by_id(payload.user_id).await?.is_none() {
        return Err(Error::not_found("user not found").into());
    }
    if state.patients.find_by_user(payload.user_id).await?.is_some() {
        return Err(Error::conflict("patient profile already exists").into());
    }

    let patient = state
        .patients
        .insert(NewPatient {
            user_id: payload.user_id,
            age: payload.age,
            gender: payload.gender,
            blood_group: payload.blood_group,
            allergies: payload.allergies,
            medical_history: payload.medical_history,
        })
        .await?;
    Ok(web::Json(patient))
}

/// Fetch a patient profile by id.
#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Profile", body = Patient),
        (status = 404, description = "Patient not found", body = ApiError)
    ),
    tags = ["patients"]
)]
#[get("/patients/{id}")]
pub async fn get_patient(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<Patient>> {
    let patient = state
        .patients
        .find_by_id(id.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("patient not found"))?;
    Ok(web::Json(patient))
}
