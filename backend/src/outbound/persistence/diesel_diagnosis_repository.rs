//! Diesel-backed `DiagnosisRepository` adapter.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{DiagnosisPersistenceError, DiagnosisRepository};
use crate::domain::{Diagnosis, NewDiagnosis};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{DiagnosisRow, NewDiagnosisRow};
use super::pool::DbPool;
use super::schema::diagnoses;

/// PostgreSQL-backed diagnosis repository.
#[derive(Clone)]
pub struct DieselDiagnosisRepository {
    pool: DbPool,
}

impl DieselDiagnosisRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiagnosisRepository for DieselDiagnosisRepository {
    async fn insert(
        &self,
        new_diagnosis: NewDiagnosis,
    ) -> Result<Diagnosis, DiagnosisPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| DiagnosisPersistenceError::connection(pool_error_message(err)))?;

        let row = NewDiagnosisRow {
            id: Uuid::new_v4(),
            patient_id: new_diagnosis.patient_id,
            doctor_id: new_diagnosis.doctor_id,
            appointment_id: new_diagnosis.appointment_id,
            summary: &new_diagnosis.summary,
            details: new_diagnosis.details.as_deref(),
            created_at: Utc::now(),
        };
        let stored: DiagnosisRow = diesel::insert_into(diagnoses::table)
            .values(&row)
            .returning(DiagnosisRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                DiagnosisPersistenceError::query(diesel_error_message(err, "insert diagnosis"))
            })?;

        Ok(stored.into())
    }

    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Diagnosis>, DiagnosisPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| DiagnosisPersistenceError::connection(pool_error_message(err)))?;

        let rows: Vec<DiagnosisRow> = diagnoses::table
            .filter(diagnoses::doctor_id.eq(doctor_id))
            .order_by(diagnoses::created_at.desc())
            .select(DiagnosisRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                DiagnosisPersistenceError::query(diesel_error_message(
                    err,
                    "list diagnoses for doctor",
                ))
            })?;

        Ok(rows.into_iter().map(Diagnosis::from).collect())
    }
}
