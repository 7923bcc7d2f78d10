//! Port abstraction for diagnosis persistence adapters.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Diagnosis, Error, NewDiagnosis};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by diagnosis repository adapters.
    pub enum DiagnosisPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "diagnosis repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "diagnosis repository query failed: {message}",
    }
}

impl From<DiagnosisPersistenceError> for Error {
    fn from(err: DiagnosisPersistenceError) -> Self {
        match err {
            DiagnosisPersistenceError::Connection { message } => {
                Error::service_unavailable(message)
            }
            DiagnosisPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

#[async_trait]
pub trait DiagnosisRepository: Send + Sync {
    /// Persist a diagnosis, assigning its identifier and creation time.
    async fn insert(
        &self,
        new_diagnosis: NewDiagnosis,
    ) -> Result<Diagnosis, DiagnosisPersistenceError>;

    /// A doctor's diagnoses, newest first.
    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Diagnosis>, DiagnosisPersistenceError>;
}

/// In-memory diagnosis store for tests.
#[derive(Debug, Default)]
pub struct FixtureDiagnosisRepository {
    rows: Mutex<Vec<Diagnosis>>,
}

impl FixtureDiagnosisRepository {
    fn rows(&self) -> MutexGuard<'_, Vec<Diagnosis>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DiagnosisRepository for FixtureDiagnosisRepository {
    async fn insert(
        &self,
        new_diagnosis: NewDiagnosis,
    ) -> Result<Diagnosis, DiagnosisPersistenceError> {
        let diagnosis = Diagnosis {
            id: Uuid::new_v4(),
            patient_id: new_diagnosis.patient_id,
            doctor_id: new_diagnosis.doctor_id,
            appointment_id: new_diagnosis.appointment_id,
            summary: new_diagnosis.summary,
            details: new_diagnosis.details,
            created_at: Utc::now(),
        };
        self.rows().push(diagnosis.clone());
        Ok(diagnosis)
    }

    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Diagnosis>, DiagnosisPersistenceError> {
        let mut matches: Vec<Diagnosis> = self
            .rows()
            .iter()
            .filter(|diagnosis| diagnosis.doctor_id == doctor_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn diagnoses_are_listed_per_doctor() {
        let repo = FixtureDiagnosisRepository::default();
        let doctor_id = Uuid::new_v4();

        let recorded = repo
            .insert(NewDiagnosis {
                patient_id: Uuid::new_v4(),
                doctor_id,
                appointment_id: None,
                summary: "Acute bronchitis".to_owned(),
                details: Some("Productive cough for ten days.".to_owned()),
            })
            .await
            .expect("insert");
        repo.insert(NewDiagnosis {
            patient_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            appointment_id: None,
            summary: "Sprained ankle".to_owned(),
            details: None,
        })
        .await
        .expect("insert");

        let listed = repo.list_for_doctor(doctor_id).await.expect("list");
        assert_eq!(listed, vec![recorded]);
    }
}
