//! Diesel-backed `PrescriptionRepository` adapter.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PrescriptionPersistenceError, PrescriptionRepository};
use crate::domain::{NewPrescription, Prescription};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{NewPrescriptionRow, PrescriptionRow};
use super::pool::DbPool;
use super::schema::prescriptions;

/// PostgreSQL-backed prescription repository.
#[derive(Clone)]
pub struct DieselPrescriptionRepository {
    pool: DbPool,
}

impl DieselPrescriptionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrescriptionRepository for DieselPrescriptionRepository {
    async fn insert(
        &self,
        new_prescription: NewPrescription,
    ) -> Result<Prescription, PrescriptionPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| PrescriptionPersistenceError::connection(pool_error_message(err)))?;

        let row = NewPrescriptionRow {
            id: Uuid::new_v4(),
            patient_id: new_prescription.patient_id,
            doctor_id: new_prescription.doctor_id,
            medication_name: &new_prescription.medication_name,
            dosage: new_prescription.dosage.as_deref(),
            instructions: new_prescription.instructions.as_deref(),
            start_date: new_prescription.start_date,
            end_date: new_prescription.end_date,
            created_at: Utc::now(),
        };
        let stored: PrescriptionRow = diesel::insert_into(prescriptions::table)
            .values(&row)
            .returning(PrescriptionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                PrescriptionPersistenceError::query(diesel_error_message(
                    err,
                    "insert prescription",
                ))
            })?;

        Ok(stored.into())
    }

    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Prescription>, PrescriptionPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| PrescriptionPersistenceError::connection(pool_error_message(err)))?;

        let rows: Vec<PrescriptionRow> = prescriptions::table
            .filter(prescriptions::doctor_id.eq(doctor_id))
            .order_by(prescriptions::created_at.desc())
            .select(PrescriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                PrescriptionPersistenceError::query(diesel_error_message(
                    err,
                    "list prescriptions for doctor",
                ))
            })?;

        Ok(rows.into_iter().map(Prescription::from).collect())
    }
}
