//! Vitals reading model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single set of vitals recorded for a patient.
///
/// Readings are stored exactly as entered (free-form text); no numeric
/// validation or unit normalisation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Vitals {
    pub id: Uuid,
    pub patient_id: Uuid,
    #[schema(example = "38.2")]
    pub temperature: String,
    #[schema(example = "96")]
    pub pulse: String,
    #[schema(example = "120/80")]
    pub blood_pressure: String,
    #[schema(example = "97")]
    pub oxygen: String,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Input for recording vitals; the repository assigns `id` and
/// `recorded_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVitals {
    pub patient_id: Uuid,
    pub temperature: String,
    pub pulse: String,
    pub blood_pressure: String,
    pub oxygen: String,
    pub notes: Option<String>,
}
