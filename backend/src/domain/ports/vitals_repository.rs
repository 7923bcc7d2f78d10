//! Port abstraction for vitals persistence adapters.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Error, NewVitals, Vitals};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by vitals repository adapters.
    pub enum VitalsPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "vitals repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vitals repository query failed: {message}",
    }
}

impl From<VitalsPersistenceError> for Error {
    fn from(err: VitalsPersistenceError) -> Self {
        match err {
            VitalsPersistenceError::Connection { message } => Error::service_unavailable(message),
            VitalsPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

#[async_trait]
pub trait VitalsRepository: Send + Sync {
    /// Persist a vitals reading, assigning its identifier and recording
    /// time.
    async fn insert(&self, new_vitals: NewVitals) -> Result<Vitals, VitalsPersistenceError>;

    /// A patient's vitals readings, in recording order.
    async fn list_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Vitals>, VitalsPersistenceError>;

    /// Every vitals reading on record.
    async fn list(&self) -> Result<Vec<Vitals>, VitalsPersistenceError>;

    /// Count all vitals readings.
    async fn count(&self) -> Result<i64, VitalsPersistenceError>;
}

/// In-memory vitals store for tests.
#[derive(Debug, Default)]
pub struct FixtureVitalsRepository {
    rows: Mutex<Vec<Vitals>>,
}

impl FixtureVitalsRepository {
    fn rows(&self) -> MutexGuard<'_, Vec<Vitals>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl VitalsRepository for FixtureVitalsRepository {
    async fn insert(&self, new_vitals: NewVitals) -> Result<Vitals, VitalsPersistenceError> {
        let vitals = Vitals {
            id: Uuid::new_v4(),
            patient_id: new_vitals.patient_id,
            temperature: new_vitals.temperature,
            pulse: new_vitals.pulse,
            blood_pressure: new_vitals.blood_pressure,
            oxygen: new_vitals.oxygen,
            notes: new_vitals.notes,
            recorded_at: Utc::now(),
        };
        self.rows().push(vitals.clone());
        Ok(vitals)
    }

    async fn list_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Vitals>, VitalsPersistenceError> {
        Ok(self
            .rows()
            .iter()
            .filter(|vitals| vitals.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Vitals>, VitalsPersistenceError> {
        Ok(self.rows().clone())
    }

    async fn count(&self) -> Result<i64, VitalsPersistenceError> {
        Ok(self.rows().len() as i64)
    }
}
