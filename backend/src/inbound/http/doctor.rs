//! Doctor-facing handlers: appointment/patient views and clinical records.

use actix_web::{get, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Appointment, Diagnosis, NewDiagnosis, NewPrescription, Patient, Prescription,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation;

/// Request body for `POST /doctor/diagnosis`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateDiagnosisRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    #[serde(default)]
    pub appointment_id: Option<Uuid>,
    pub summary: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Request body for `POST /doctor/prescription`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatePrescriptionRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub medication_name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// List a doctor's appointments.
#[utoipa::path(
    get,
    path = "/doctor/{id}/appointments",
    params(("id" = Uuid, Path, description = "Doctor identifier")),
    responses((status = 200, description = "Appointments", body = [Appointment])),
    tags = ["doctor"]
)]
#[get("/doctor/{id}/appointments")]
pub async fn doctor_appointments(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Appointment>>> {
    let appointments = state.appointments.list_for_doctor(id.into_inner()).await?;
    Ok(web::Json(appointments))
}

/// List the distinct patients a doctor has appointments with.
///
/// Composed from the appointment listing plus per-id profile lookups; the
/// first appointment with a patient decides their position in the result.
#[utoipa::path(
    get,
    path = "/doctor/{id}/patients",
    params(("id" = Uuid, Path, description = "Doctor identifier")),
    responses((status = 200, description = "Patients", body = [Patient])),
    tags = ["doctor"]
)]
#[get("/doctor/{id}/patients")]
pub async fn doctor_patients(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Patient>>> {
    let appointments = state.appointments.list_for_doctor(id.into_inner()).await?;

    let mut seen: Vec<Uuid> = Vec::new();
    for appointment in &appointments {
        if !seen.contains(&appointment.patient_id) {
            seen.push(appointment.patient_id);
        }
    }

    let mut patients = Vec::with_capacity(seen.len());
    for patient_id in seen {
        // Appointments can reference profiles that were never created;
        // those ids are skipped rather than reported.
        if let Some(patient) = state.patients.find_by_id(patient_id).await? {
            patients.push(patient);
        }
    }
    Ok(web::Json(patients))
}

/// Record a diagnosis.
#[utoipa::path(
    post,
    path = "/doctor/diagnosis",
    request_body = CreateDiagnosisRequest,
    responses(
        (status = 200, description = "Diagnosis recorded", body = Diagnosis),
        (status = 400, description = "Missing summary", body = ApiError)
    ),
    tags = ["doctor"]
)]
#[post("/doctor/diagnosis")]
pub async fn create_diagnosis(
    state: web::Data<HttpState>,
    payload: web::Json<CreateDiagnosisRequest>,
) -> ApiResult<web::Json<Diagnosis>> {
    let payload = payload.into_inner();
    validation::require_non_blank("summary", &payload.summary)?;

    let diagnosis = state
        .diagnoses
        .insert(NewDiagnosis {
            patient_id: payload.patient_id,
            doctor_id: payload.doctor_id,
            appointment_id: payload.appointment_id,
            summary: payload.summary,
            details: payload.details,
        })
        .await?;
    Ok(web::Json(diagnosis))
}

/// List a doctor's diagnoses, newest first.
#[utoipa::path(
    get,
    path = "/doctor/{id}/diagnoses",
    params(("id" = Uuid, Path, description = "Doctor identifier")),
    responses((status = 200, description = "Diagnoses, newest first", body = [Diagnosis])),
    tags = ["doctor"]
)]
#[get("/doctor/{id}/diagnoses")]
pub async fn doctor_diagnoses(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Diagnosis>>> {
    let diagnoses = state.diagnoses.list_for_doctor(id.into_inner()).await?;
    Ok(web::Json(diagnoses))
}

/// Issue a prescription.
///
/// No ordering check between start and end dates, matching the stored
/// contract.
#[utoipa::path(
    post,
    path = "/doctor/prescription",
    request_body = CreatePrescriptionRequest,
    responses(
        (status = 200, description = "Prescription issued", body = Prescription),
        (status = 400, description = "Missing medication name", body = ApiError)
    ),
    tags = ["doctor"]
)]
#[post("/doctor/prescription")]
pub async fn create_prescription(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePrescriptionRequest>,
) -> ApiResult<web::Json<Prescription>> {
    let payload = payload.into_inner();
    validation::require_non_blank("medication_name", &payload.medication_name)?;

    let prescription = state
        .prescriptions
        .insert(NewPrescription {
            patient_id: payload.patient_id,
            doctor_id: payload.doctor_id,
            medication_name: payload.medication_name,
            dosage: payload.dosage,
            instructions: payload.instructions,
            start_date: payload.start_date,
            end_date: payload.end_date,
        })
        .await?;
    Ok(web::Json(prescription))
}

/// List a doctor's prescriptions, newest first.
#[utoipa::path(
    get,
    path = "/doctor/{id}/prescriptions",
    params(("id" = Uuid, Path, description = "Doctor identifier")),
    responses((status = 200, description = "Prescriptions, newest first", body = [Prescription])),
    tags = ["doctor"]
)]
#[get("/doctor/{id}/prescriptions")]
pub async fn doctor_prescriptions(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Prescription>>> {
    let prescriptions = state.prescriptions.list_for_doctor(id.into_inner()).await?;
    Ok(web::Json(prescriptions))
}
