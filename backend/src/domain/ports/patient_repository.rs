//! Port abstraction for patient profile persistence adapters.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, NewPatient, Patient};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by patient repository adapters.
    pub enum PatientPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "patient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "patient repository query failed: {message}",
    }
}

impl From<PatientPersistenceError> for Error {
    fn from(err: PatientPersistenceError) -> Self {
        match err {
            PatientPersistenceError::Connection { message } => Error::service_unavailable(message),
            PatientPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Persist a new patient profile, assigning its identifier.
    async fn insert(&self, new_patient: NewPatient) -> Result<Patient, PatientPersistenceError>;

    /// Fetch a profile by its identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, PatientPersistenceError>;

    /// Fetch the profile belonging to a user, if one exists.
    async fn find_by_user(&self, user_id: Uuid)
    -> Result<Option<Patient>, PatientPersistenceError>;

    /// Count all patient profiles.
    async fn count(&self) -> Result<i64, PatientPersistenceError>;
}

/// In-memory patient store for tests.
#[derive(Debug, Default)]
pub struct FixturePatientRepository {
    rows: Mutex<Vec<Patient>>,
}

impl FixturePatientRepository {
    fn rows(&self) -> MutexGuard<'_, Vec<Patient>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PatientRepository for FixturePatientRepository {
    async fn insert(&self, new_patient: NewPatient) -> Result<Patient, PatientPersistenceError> {
        let patient = Patient {
            id: Uuid::new_v4(),
            user_id: new_patient.user_id,
            age: new_patient.age,
            gender: new_patient.gender,
            blood_group: new_patient.blood_group,
            allergies: new_patient.allergies,
            medical_history: new_patient.medical_history,
        };
        self.rows().push(patient.clone());
        Ok(patient)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, PatientPersistenceError> {
        Ok(self.rows().iter().find(|patient| patient.id == id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Patient>, PatientPersistenceError> {
        Ok(self
            .rows()
            .iter()
            .find(|patient| patient.user_id == user_id)
            .cloned())
    }

    async fn count(&self) -> Result<i64, PatientPersistenceError> {
        Ok(self.rows().len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn profile_is_found_by_id_and_by_user() {
        let repo = FixturePatientRepository::default();
        let user_id = Uuid::new_v4();
        let patient = repo
            .insert(NewPatient {
                user_id,
                age: Some(34),
                gender: Some("Female".to_owned()),
                blood_group: Some("O+".to_owned()),
                allergies: None,
                medical_history: None,
            })
            .await
            .expect("insert");

        assert_eq!(
            repo.find_by_id(patient.id).await.expect("find"),
            Some(patient.clone())
        );
        assert_eq!(
            repo.find_by_user(user_id).await.expect("find"),
            Some(patient)
        );
        assert_eq!(repo.find_by_user(Uuid::new_v4()).await.expect("find"), None);
    }
}
