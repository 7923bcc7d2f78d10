//! Diesel-backed `PatientRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PatientPersistenceError, PatientRepository};
use crate::domain::{NewPatient, Patient};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{NewPatientRow, PatientRow};
use super::pool::DbPool;
use super::schema::patients;

/// PostgreSQL-backed patient repository.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn insert(&self, new_patient: NewPatient) -> Result<Patient, PatientPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| PatientPersistenceError::connection(pool_error_message(err)))?;

        let row = NewPatientRow {
            id: Uuid::new_v4(),
            user_id: new_patient.user_id,
            age: new_patient.age,
            gender: new_patient.gender.as_deref(),
            blood_group: new_patient.blood_group.as_deref(),
            allergies: new_patient.allergies.as_deref(),
            medical_history: new_patient.medical_history.as_deref(),
        };
        let stored: PatientRow = diesel::insert_into(patients::table)
            .values(&row)
            .returning(PatientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                PatientPersistenceError::query(diesel_error_message(err, "insert patient"))
            })?;

        Ok(stored.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, PatientPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| PatientPersistenceError::connection(pool_error_message(err)))?;

        let row: Option<PatientRow> = patients::table
            .filter(patients::id.eq(id))
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                PatientPersistenceError::query(diesel_error_message(err, "find patient by id"))
            })?;

        Ok(row.map(Patient::from))
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Patient>, PatientPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| PatientPersistenceError::connection(pool_error_message(err)))?;

        let row: Option<PatientRow> = patients::table
            .filter(patients::user_id.eq(user_id))
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                PatientPersistenceError::query(diesel_error_message(err, "find patient by user"))
            })?;

        Ok(row.map(Patient::from))
    }

    async fn count(&self) -> Result<i64, PatientPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| PatientPersistenceError::connection(pool_error_message(err)))?;

        patients::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                PatientPersistenceError::query(diesel_error_message(err, "count patients"))
            })
    }
}
