//! PostgreSQL persistence adapters for the repository ports.
//!
//! One Diesel-backed adapter per port, sharing the [`DbPool`]. The schema is
//! created at startup by applying the embedded migrations, mirroring the
//! create-on-boot lifecycle of the store.

mod diesel_appointment_repository;
mod diesel_diagnosis_repository;
mod diesel_helpers;
mod diesel_patient_repository;
mod diesel_prescription_repository;
mod diesel_user_repository;
mod diesel_vitals_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_diagnosis_repository::DieselDiagnosisRepository;
pub use diesel_patient_repository::DieselPatientRepository;
pub use diesel_prescription_repository::DieselPrescriptionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vitals_repository::DieselVitalsRepository;
pub use pool::{DbPool, PoolError};

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Embedded schema migrations, applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying startup migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be established.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),

    /// A migration failed to apply.
    #[error("failed to apply migrations: {0}")]
    Apply(String),
}

/// Apply pending migrations over a short-lived synchronous connection.
pub fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply(err.to_string()))?;
    info!(applied = applied.len(), "schema migrations applied");
    Ok(())
}
