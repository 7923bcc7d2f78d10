//! Diesel-backed `VitalsRepository` adapter.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{VitalsPersistenceError, VitalsRepository};
use crate::domain::{NewVitals, Vitals};

use super::diesel_helpers::{diesel_error_message, pool_error_message};
use super::models::{NewVitalsRow, VitalsRow};
use super::pool::DbPool;
use super::schema::vitals;

/// PostgreSQL-backed vitals repository.
#[derive(Clone)]
pub struct DieselVitalsRepository {
    pool: DbPool,
}

impl DieselVitalsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VitalsRepository for DieselVitalsRepository {
    async fn insert(&self, new_vitals: NewVitals) -> Result<Vitals, VitalsPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| VitalsPersistenceError::connection(pool_error_message(err)))?;

        let row = NewVitalsRow {
            id: Uuid::new_v4(),
            patient_id: new_vitals.patient_id,
            temperature: &new_vitals.temperature,
            pulse: &new_vitals.pulse,
            blood_pressure: &new_vitals.blood_pressure,
            oxygen: &new_vitals.oxygen,
            notes: new_vitals.notes.as_deref(),
            recorded_at: Utc::now(),
        };
        let stored: VitalsRow = diesel::insert_into(vitals::table)
            .values(&row)
            .returning(VitalsRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                VitalsPersistenceError::query(diesel_error_message(err, "insert vitals"))
            })?;

        Ok(stored.into())
    }

    async fn list_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Vitals>, VitalsPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| VitalsPersistenceError::connection(pool_error_message(err)))?;

        let rows: Vec<VitalsRow> = vitals::table
            .filter(vitals::patient_id.eq(patient_id))
            .select(VitalsRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                VitalsPersistenceError::query(diesel_error_message(
                    err,
                    "list vitals for patient",
                ))
            })?;

        Ok(rows.into_iter().map(Vitals::from).collect())
    }

    async fn list(&self) -> Result<Vec<Vitals>, VitalsPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| VitalsPersistenceError::connection(pool_error_message(err)))?;

        let rows: Vec<VitalsRow> = vitals::table
            .select(VitalsRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                VitalsPersistenceError::query(diesel_error_message(err, "list vitals"))
            })?;

        Ok(rows.into_iter().map(Vitals::from).collect())
    }

    async fn count(&self) -> Result<i64, VitalsPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| VitalsPersistenceError::connection(pool_error_message(err)))?;

        vitals::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                VitalsPersistenceError::query(diesel_error_message(err, "count vitals"))
            })
    }
}
