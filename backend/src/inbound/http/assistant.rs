//! Heuristic responder endpoints: symptom triage and intake chat.
//!
//! Both handlers call straight into the pure rule engine in
//! [`crate::domain::triage`]; no store access, no state.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::triage::{TriageAssessment, assess_symptoms, intake_follow_up};
use crate::inbound::http::ApiResult;

/// Request body for `POST /ai/diagnosis-assistant`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SymptomReport {
    /// Free-text symptom description.
    pub symptoms: String,
    /// Optional supplementary note; accepted for contract compatibility
    /// but not consulted by the rule table.
    #[serde(default)]
    pub vitals_note: Option<String>,
}

/// Request body for `POST /ai/intake-chat`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IntakeMessage {
    pub message: String,
}

/// Response body for `POST /ai/intake-chat`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IntakeReply {
    pub reply: String,
}

/// Suggest possible conditions for a symptom description.
#[utoipa::path(
    post,
    path = "/ai/diagnosis-assistant",
    request_body = SymptomReport,
    responses((status = 200, description = "Assessment with disclaimer", body = TriageAssessment)),
    tags = ["assistant"]
)]
#[post("/ai/diagnosis-assistant")]
pub async fn diagnosis_assistant(
    payload: web::Json<SymptomReport>,
) -> ApiResult<web::Json<TriageAssessment>> {
    Ok(web::Json(assess_symptoms(&payload.symptoms)))
}

/// Return the next intake question for a chat message.
///
/// Stateless: the transcript lives in the caller.
#[utoipa::path(
    post,
    path = "/ai/intake-chat",
    request_body = IntakeMessage,
    responses((status = 200, description = "Follow-up question", body = IntakeReply)),
    tags = ["assistant"]
)]
#[post("/ai/intake-chat")]
pub async fn intake_chat(payload: web::Json<IntakeMessage>) -> ApiResult<web::Json<IntakeReply>> {
    let reply = intake_follow_up(&payload.message);
    Ok(web::Json(IntakeReply {
        reply: reply.to_owned(),
    }))
}
