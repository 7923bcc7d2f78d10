//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on the domain ports and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{
    AppointmentRepository, DiagnosisRepository, FixtureAppointmentRepository,
    FixtureDiagnosisRepository, FixturePatientRepository, FixturePrescriptionRepository,
    FixtureUserRepository, FixtureVitalsRepository, PatientRepository, PrescriptionRepository,
    UserRepository, VitalsRepository,
};

/// Dependency bundle for HTTP handlers: one repository port per entity.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub patients: Arc<dyn PatientRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub vitals: Arc<dyn VitalsRepository>,
    pub diagnoses: Arc<dyn DiagnosisRepository>,
    pub prescriptions: Arc<dyn PrescriptionRepository>,
}

impl HttpState {
    /// State backed entirely by in-memory fixtures; used by tests.
    pub fn fixtures() -> Self {
        Self {
            users: Arc::new(FixtureUserRepository::default()),
            patients: Arc::new(FixturePatientRepository::default()),
            appointments: Arc::new(FixtureAppointmentRepository::default()),
            vitals: Arc::new(FixtureVitalsRepository::default()),
            diagnoses: Arc::new(FixtureDiagnosisRepository::default()),
            prescriptions: Arc::new(FixturePrescriptionRepository::default()),
        }
    }
}
