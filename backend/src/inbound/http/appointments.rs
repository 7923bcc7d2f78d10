//! Appointment booking and listing handlers.

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Appointment, NewAppointment};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /appointments`.
///
/// There is no status field: bookings always start as `Scheduled`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateAppointmentRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    #[serde(default)]
    pub department: Option<String>,
    pub scheduled_time: DateTime<Utc>,
}

/// Book an appointment.
///
/// Referential integrity beyond the store's FK constraints is intentionally
/// not checked here.
#[utoipa::path(
    post,
    path = "/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Malformed payload", body = ApiError)
    ),
    tags = ["appointments"]
)]
#[post("/appointments")]
pub async fn create_appointment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAppointmentRequest>,
) -> ApiResult<web::Json<Appointment>> {
    let payload = payload.into_inner();
    let appointment = state
        .appointments
        .insert(NewAppointment {
            patient_id: payload.patient_id,
            doctor_id: payload.doctor_id,
            department: payload.department,
            scheduled_time: payload.scheduled_time,
        })
        .await?;
    Ok(web::Json(appointment))
}

/// List a patient's appointments, newest scheduled time first.
#[utoipa::path(
    get,
    path = "/appointments/patient/{id}",
    params(("id" = Uuid, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Appointments, newest first", body = [Appointment])
    ),
    tags = ["appointments"]
)]
#[get("/appointments/patient/{id}")]
pub async fn patient_appointments(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Appointment>>> {
    let appointments = state.appointments.list_for_patient(id.into_inner()).await?;
    Ok(web::Json(appointments))
}
