//! Port abstraction for prescription persistence adapters.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Error, NewPrescription, Prescription};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by prescription repository adapters.
    pub enum PrescriptionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "prescription repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "prescription repository query failed: {message}",
    }
}

impl From<PrescriptionPersistenceError> for Error {
    fn from(err: PrescriptionPersistenceError) -> Self {
        match err {
            PrescriptionPersistenceError::Connection { message } => {
                Error::service_unavailable(message)
            }
            PrescriptionPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

#[async_trait]
pub trait PrescriptionRepository: Send + Sync {
    /// Persist a prescription, assigning its identifier and creation time.
    async fn insert(
        &self,
        new_prescription: NewPrescription,
    ) -> Result<Prescription, PrescriptionPersistenceError>;

    /// A doctor's prescriptions, newest first.
    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionPersistenceError>;
}

/// In-memory prescription store for tests.
#[derive(Debug, Default)]
pub struct FixturePrescriptionRepository {
    rows: Mutex<Vec<Prescription>>,
}

impl FixturePrescriptionRepository {
    fn rows(&self) -> MutexGuard<'_, Vec<Prescription>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PrescriptionRepository for FixturePrescriptionRepository {
    async fn insert(
        &self,
        new_prescription: NewPrescription,
    ) -> Result<Prescription, PrescriptionPersistenceError> {
        let prescription = Prescription {
            id: Uuid::new_v4(),
            patient_id: new_prescription.patient_id,
            doctor_id: new_prescription.doctor_id,
            medication_name: new_prescription.medication_name,
            dosage: new_prescription.dosage,
            instructions: new_prescription.instructions,
            start_date: new_prescription.start_date,
            end_date: new_prescription.end_date,
            created_at: Utc::now(),
        };
        self.rows().push(prescription.clone());
        Ok(prescription)
    }

    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionPersistenceError> {
        let mut matches: Vec<Prescription> = self
            .rows()
            .iter()
            .filter(|prescription| prescription.doctor_id == doctor_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn prescriptions_are_listed_per_doctor() {
        let repo = FixturePrescriptionRepository::default();
        let doctor_id = Uuid::new_v4();

        let recorded = repo
            .insert(NewPrescription {
                patient_id: Uuid::new_v4(),
                doctor_id,
                medication_name: "Amoxicillin".to_owned(),
                dosage: Some("500 mg BID".to_owned()),
                instructions: Some("With food.".to_owned()),
                start_date: NaiveDate::from_ymd_opt(2026, 3, 14),
                end_date: NaiveDate::from_ymd_opt(2026, 3, 21),
            })
            .await
            .expect("insert");
        repo.insert(NewPrescription {
            patient_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            medication_name: "Ibuprofen".to_owned(),
            dosage: None,
            instructions: None,
            start_date: None,
            end_date: None,
        })
        .await
        .expect("insert");

        let listed = repo.list_for_doctor(doctor_id).await.expect("list");
        assert_eq!(listed, vec![recorded]);
    }
}
