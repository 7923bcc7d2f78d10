//! Vitals recording and listing handlers.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{NewVitals, Vitals};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /vitals` and `POST /nurse/vitals`.
///
/// Readings are free-form text and stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateVitalsRequest {
    pub patient_id: Uuid,
    pub temperature: String,
    pub pulse: String,
    pub blood_pressure: String,
    pub oxygen: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Shared insert path for the two vitals recording endpoints.
pub(crate) async fn insert_reading(
    state: &HttpState,
    payload: CreateVitalsRequest,
) -> ApiResult<Vitals> {
    let vitals = state
        .vitals
        .insert(NewVitals {
            patient_id: payload.patient_id,
            temperature: payload.temperature,
            pulse: payload.pulse,
            blood_pressure: payload.blood_pressure,
            oxygen: payload.oxygen,
            notes: payload.notes,
        })
        .await?;
    Ok(vitals)
}

/// Record a vitals reading.
#[utoipa::path(
    post,
    path = "/vitals",
    request_body = CreateVitalsRequest,
    responses((status = 200, description = "Reading recorded", body = Vitals)),
    tags = ["vitals"]
)]
#[post("/vitals")]
pub async fn record_vitals(
    state: web::Data<HttpState>,
    payload: web::Json<CreateVitalsRequest>,
) -> ApiResult<web::Json<Vitals>> {
    let vitals = insert_reading(&state, payload.into_inner()).await?;
    Ok(web::Json(vitals))
}

/// List a patient's vitals readings.
#[utoipa::path(
    get,
    path = "/vitals/{patient_id}",
    params(("patient_id" = Uuid, Path, description = "Patient identifier")),
    responses((status = 200, description = "Readings", body = [Vitals])),
    tags = ["vitals"]
)]
#[get("/vitals/{patient_id}")]
pub async fn patient_vitals(
    state: web::Data<HttpState>,
    patient_id: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Vitals>>> {
    let readings = state.vitals.list_for_patient(patient_id.into_inner()).await?;
    Ok(web::Json(readings))
}
