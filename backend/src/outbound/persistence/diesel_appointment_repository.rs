//! Diesel-backed `AppointmentRepository` adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AppointmentPersistenceError, AppointmentRepository};
use crate::domain::{Appointment, AppointmentStatus, NewAppointment};

use super::diesel_helpers::{collect_rows, diesel_error_message, pool_error_message};
use super::models::{AppointmentRow, NewAppointmentRow};
use super::pool::DbPool;
use super::schema::appointments;

/// PostgreSQL-backed appointment repository.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn insert(
        &self,
        new_appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AppointmentPersistenceError::connection(pool_error_message(err)))?;

        // Status is forced here; the caller has no say in the initial state.
        let row = NewAppointmentRow {
            id: Uuid::new_v4(),
            patient_id: new_appointment.patient_id,
            doctor_id: new_appointment.doctor_id,
            department: new_appointment.department.as_deref(),
            scheduled_time: new_appointment.scheduled_time,
            status: AppointmentStatus::Scheduled.as_str(),
            created_at: Utc::now(),
        };
        let stored: AppointmentRow = diesel::insert_into(appointments::table)
            .values(&row)
            .returning(AppointmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                AppointmentPersistenceError::query(diesel_error_message(err, "insert appointment"))
            })?;

        stored
            .into_domain()
            .map_err(AppointmentPersistenceError::query)
    }

    async fn list_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AppointmentPersistenceError::connection(pool_error_message(err)))?;

        let rows: Vec<AppointmentRow> = appointments::table
            .filter(appointments::patient_id.eq(patient_id))
            .order_by(appointments::scheduled_time.desc())
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                AppointmentPersistenceError::query(diesel_error_message(
                    err,
                    "list appointments for patient",
                ))
            })?;

        collect_rows(
            rows.into_iter().map(AppointmentRow::into_domain),
            AppointmentPersistenceError::query,
        )
    }

    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AppointmentPersistenceError::connection(pool_error_message(err)))?;

        let rows: Vec<AppointmentRow> = appointments::table
            .filter(appointments::doctor_id.eq(doctor_id))
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                AppointmentPersistenceError::query(diesel_error_message(
                    err,
                    "list appointments for doctor",
                ))
            })?;

        collect_rows(
            rows.into_iter().map(AppointmentRow::into_domain),
            AppointmentPersistenceError::query,
        )
    }

    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AppointmentPersistenceError::connection(pool_error_message(err)))?;

        let rows: Vec<AppointmentRow> = appointments::table
            .filter(appointments::scheduled_time.ge(start))
            .filter(appointments::scheduled_time.lt(end))
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                AppointmentPersistenceError::query(diesel_error_message(
                    err,
                    "list appointments in window",
                ))
            })?;

        collect_rows(
            rows.into_iter().map(AppointmentRow::into_domain),
            AppointmentPersistenceError::query,
        )
    }

    async fn list(&self) -> Result<Vec<Appointment>, AppointmentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AppointmentPersistenceError::connection(pool_error_message(err)))?;

        let rows: Vec<AppointmentRow> = appointments::table
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                AppointmentPersistenceError::query(diesel_error_message(err, "list appointments"))
            })?;

        collect_rows(
            rows.into_iter().map(AppointmentRow::into_domain),
            AppointmentPersistenceError::query,
        )
    }

    async fn count(&self) -> Result<i64, AppointmentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AppointmentPersistenceError::connection(pool_error_message(err)))?;

        appointments::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                AppointmentPersistenceError::query(diesel_error_message(err, "count appointments"))
            })
    }

    async fn count_from(
        &self,
        from: DateTime<Utc>,
    ) -> Result<i64, AppointmentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| AppointmentPersistenceError::connection(pool_error_message(err)))?;

        appointments::table
            .filter(appointments::scheduled_time.ge(from))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                AppointmentPersistenceError::query(diesel_error_message(
                    err,
                    "count upcoming appointments",
                ))
            })
    }
}
