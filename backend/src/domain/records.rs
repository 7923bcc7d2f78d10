//! Clinical record models: diagnoses and prescriptions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Diagnosis recorded by a doctor, optionally linked to an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Diagnosis {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_id: Option<Uuid>,
    #[schema(example = "Acute bronchitis")]
    pub summary: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a diagnosis; the repository assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiagnosis {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub summary: String,
    pub details: Option<String>,
}

/// Prescription issued by a doctor.
///
/// No ordering is enforced between `start_date` and `end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Prescription {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    #[schema(example = "Amoxicillin")]
    pub medication_name: String,
    #[schema(example = "500 mg BID")]
    pub dosage: Option<String>,
    pub instructions: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Input for issuing a prescription; the repository assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrescription {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub medication_name: String,
    pub dosage: Option<String>,
    pub instructions: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
