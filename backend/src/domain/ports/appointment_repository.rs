//! Port abstraction for appointment persistence adapters.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Appointment, AppointmentStatus, Error, NewAppointment};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by appointment repository adapters.
    pub enum AppointmentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "appointment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "appointment repository query failed: {message}",
    }
}

impl From<AppointmentPersistenceError> for Error {
    fn from(err: AppointmentPersistenceError) -> Self {
        match err {
            AppointmentPersistenceError::Connection { message } => {
                Error::service_unavailable(message)
            }
            AppointmentPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Persist a new appointment.
    ///
    /// The stored status is always [`AppointmentStatus::Scheduled`]; callers
    /// cannot choose the initial state.
    async fn insert(
        &self,
        new_appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentPersistenceError>;

    /// A patient's appointments, newest `scheduled_time` first.
    async fn list_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError>;

    /// A doctor's appointments.
    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError>;

    /// Appointments scheduled inside `[start, end)`.
    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError>;

    /// Every appointment on record.
    async fn list(&self) -> Result<Vec<Appointment>, AppointmentPersistenceError>;

    /// Count all appointments.
    async fn count(&self) -> Result<i64, AppointmentPersistenceError>;

    /// Count appointments scheduled at or after the given instant.
    async fn count_from(&self, from: DateTime<Utc>)
    -> Result<i64, AppointmentPersistenceError>;
}

/// In-memory appointment store for tests.
#[derive(Debug, Default)]
pub struct FixtureAppointmentRepository {
    rows: Mutex<Vec<Appointment>>,
}

impl FixtureAppointmentRepository {
    fn rows(&self) -> MutexGuard<'_, Vec<Appointment>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AppointmentRepository for FixtureAppointmentRepository {
    async fn insert(
        &self,
        new_appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentPersistenceError> {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: new_appointment.patient_id,
            doctor_id: new_appointment.doctor_id,
            department: new_appointment.department,
            scheduled_time: new_appointment.scheduled_time,
            status: AppointmentStatus::Scheduled,
            created_at: Utc::now(),
        };
        self.rows().push(appointment.clone());
        Ok(appointment)
    }

    async fn list_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError> {
        let mut matches: Vec<Appointment> = self
            .rows()
            .iter()
            .filter(|appointment| appointment.patient_id == patient_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.scheduled_time.cmp(&a.scheduled_time));
        Ok(matches)
    }

    async fn list_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError> {
        Ok(self
            .rows()
            .iter()
            .filter(|appointment| appointment.doctor_id == doctor_id)
            .cloned()
            .collect())
    }

    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError> {
        Ok(self
            .rows()
            .iter()
            .filter(|appointment| {
                appointment.scheduled_time >= start && appointment.scheduled_time < end
            })
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Appointment>, AppointmentPersistenceError> {
        Ok(self.rows().clone())
    }

    async fn count(&self) -> Result<i64, AppointmentPersistenceError> {
        Ok(self.rows().len() as i64)
    }

    async fn count_from(
        &self,
        from: DateTime<Utc>,
    ) -> Result<i64, AppointmentPersistenceError> {
        Ok(self
            .rows()
            .iter()
            .filter(|appointment| appointment.scheduled_time >= from)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(patient_id: Uuid, doctor_id: Uuid, scheduled_time: DateTime<Utc>) -> NewAppointment {
        NewAppointment {
            patient_id,
            doctor_id,
            department: Some("Cardiology".to_owned()),
            scheduled_time,
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).single().expect("valid time")
    }

    #[tokio::test]
    async fn insert_forces_scheduled_status() {
        let repo = FixtureAppointmentRepository::default();
        let appointment = repo
            .insert(booking(Uuid::new_v4(), Uuid::new_v4(), at(9)))
            .await
            .expect("insert");
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    }

    #[tokio::test]
    async fn patient_listing_is_newest_first() {
        let repo = FixtureAppointmentRepository::default();
        let patient_id = Uuid::new_v4();
        let doctor_id = Uuid::new_v4();

        let earlier = repo
            .insert(booking(patient_id, doctor_id, at(9)))
            .await
            .expect("insert");
        let later = repo
            .insert(booking(patient_id, doctor_id, at(15)))
            .await
            .expect("insert");
        repo.insert(booking(Uuid::new_v4(), doctor_id, at(12)))
            .await
            .expect("insert");

        let listed = repo.list_for_patient(patient_id).await.expect("list");
        assert_eq!(listed, vec![later, earlier]);
    }

    #[tokio::test]
    async fn window_is_half_open() {
        let repo = FixtureAppointmentRepository::default();
        let patient_id = Uuid::new_v4();
        let doctor_id = Uuid::new_v4();

        let inside = repo
            .insert(booking(patient_id, doctor_id, at(9)))
            .await
            .expect("insert");
        repo.insert(booking(patient_id, doctor_id, at(18)))
            .await
            .expect("insert");

        let listed = repo.list_between(at(8), at(18)).await.expect("list");
        assert_eq!(listed, vec![inside]);
    }

    #[tokio::test]
    async fn upcoming_count_includes_the_boundary() {
        let repo = FixtureAppointmentRepository::default();
        let patient_id = Uuid::new_v4();
        let doctor_id = Uuid::new_v4();

        repo.insert(booking(patient_id, doctor_id, at(9)))
            .await
            .expect("insert");
        repo.insert(booking(patient_id, doctor_id, at(15)))
            .await
            .expect("insert");

        assert_eq!(repo.count_from(at(9)).await.expect("count"), 2);
        assert_eq!(repo.count_from(at(10)).await.expect("count"), 1);
        assert_eq!(repo.count_from(at(16)).await.expect("count"), 0);
    }
}
