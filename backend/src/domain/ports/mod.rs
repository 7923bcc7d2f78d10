//! Repository ports for the persistence boundary.
//!
//! One port per entity, exposing only the create/read operations the
//! request layer uses. Reads return `Option`/`Vec`; "not found" is never an
//! error at this layer. Each port ships a `Fixture*` in-memory
//! implementation that reproduces the adapter's ordering and filter
//! semantics so handler tests run without a database.

mod macros;
pub(crate) use macros::define_port_error;

mod appointment_repository;
mod diagnosis_repository;
mod patient_repository;
mod prescription_repository;
mod user_repository;
mod vitals_repository;

pub use appointment_repository::{
    AppointmentPersistenceError, AppointmentRepository, FixtureAppointmentRepository,
};
pub use diagnosis_repository::{
    DiagnosisPersistenceError, DiagnosisRepository, FixtureDiagnosisRepository,
};
pub use patient_repository::{
    FixturePatientRepository, PatientPersistenceError, PatientRepository,
};
pub use prescription_repository::{
    FixturePrescriptionRepository, PrescriptionPersistenceError, PrescriptionRepository,
};
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
pub use vitals_repository::{FixtureVitalsRepository, VitalsPersistenceError, VitalsRepository};
