//! OpenAPI document served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::triage::TriageAssessment;
use crate::domain::{
    Appointment, AppointmentStatus, ClinicStats, Diagnosis, Error, ErrorCode, Patient,
    Prescription, Role, User, Vitals,
};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::{
    admin, appointments, assistant, doctor, health, nurse, patients, users, vitals,
};

/// Aggregated API documentation for the whole HTTP surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CareConnect backend",
        description = "Clinic management API: users, patients, appointments, vitals, clinical records, and the heuristic intake assistant."
    ),
    paths(
        health::index,
        health::live,
        health::ready,
        users::create_user,
        patients::create_patient,
        patients::get_patient,
        appointments::create_appointment,
        appointments::patient_appointments,
        doctor::doctor_appointments,
        doctor::doctor_patients,
        doctor::create_diagnosis,
        doctor::doctor_diagnoses,
        doctor::create_prescription,
        doctor::doctor_prescriptions,
        nurse::today_appointments,
        nurse::record_vitals,
        vitals::record_vitals,
        vitals::patient_vitals,
        admin::stats,
        admin::all_users,
        admin::all_appointments,
        admin::all_vitals,
        assistant::diagnosis_assistant,
        assistant::intake_chat,
    ),
    components(schemas(
        User,
        Role,
        Patient,
        Appointment,
        AppointmentStatus,
        Vitals,
        Diagnosis,
        Prescription,
        ClinicStats,
        Error,
        ErrorCode,
        ApiError,
        TriageAssessment,
        users::CreateUserRequest,
        patients::CreatePatientRequest,
        appointments::CreateAppointmentRequest,
        vitals::CreateVitalsRequest,
        doctor::CreateDiagnosisRequest,
        doctor::CreatePrescriptionRequest,
        assistant::SymptomReport,
        assistant::IntakeMessage,
        assistant::IntakeReply,
    ))
)]
pub struct ApiDoc;
