//! Row structs bridging the Diesel schema and the domain entities.
//!
//! Read rows convert into domain types; role and status columns are stored
//! as text, so those conversions can fail and surface as query errors.
//! Insert rows borrow from the domain input records.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Appointment, Diagnosis, Patient, Prescription, User, Vitals};

use super::schema::{appointments, diagnoses, patients, prescriptions, users, vitals};

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserRow {
    pub fn into_domain(self) -> Result<User, String> {
        let role = self.role.parse().map_err(|err| format!("{err}"))?;
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role,
            created_at: self.created_at,
            last_login: self.last_login,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PatientRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Patient {
            id: row.id,
            user_id: row.user_id,
            age: row.age,
            gender: row.gender,
            blood_group: row.blood_group,
            allergies: row.allergies,
            medical_history: row.medical_history,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = patients)]
pub struct NewPatientRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub age: Option<i32>,
    pub gender: Option<&'a str>,
    pub blood_group: Option<&'a str>,
    pub allergies: Option<&'a str>,
    pub medical_history: Option<&'a str>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AppointmentRow {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub department: Option<String>,
    pub scheduled_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl AppointmentRow {
    pub fn into_domain(self) -> Result<Appointment, String> {
        let status = self.status.parse().map_err(|err| format!("{err}"))?;
        Ok(Appointment {
            id: self.id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            department: self.department,
            scheduled_time: self.scheduled_time,
            status,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = appointments)]
pub struct NewAppointmentRow<'a> {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub department: Option<&'a str>,
    pub scheduled_time: DateTime<Utc>,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = vitals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VitalsRow {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub temperature: String,
    pub pulse: String,
    pub blood_pressure: String,
    pub oxygen: String,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl From<VitalsRow> for Vitals {
    fn from(row: VitalsRow) -> Self {
        Vitals {
            id: row.id,
            patient_id: row.patient_id,
            temperature: row.temperature,
            pulse: row.pulse,
            blood_pressure: row.blood_pressure,
            oxygen: row.oxygen,
            notes: row.notes,
            recorded_at: row.recorded_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = vitals)]
pub struct NewVitalsRow<'a> {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub temperature: &'a str,
    pub pulse: &'a str,
    pub blood_pressure: &'a str,
    pub oxygen: &'a str,
    pub notes: Option<&'a str>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = diagnoses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DiagnosisRow {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub summary: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DiagnosisRow> for Diagnosis {
    fn from(row: DiagnosisRow) -> Self {
        Diagnosis {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            appointment_id: row.appointment_id,
            summary: row.summary,
            details: row.details,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = diagnoses)]
pub struct NewDiagnosisRow<'a> {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub summary: &'a str,
    pub details: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = prescriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PrescriptionRow {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub medication_name: String,
    pub dosage: Option<String>,
    pub instructions: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<PrescriptionRow> for Prescription {
    fn from(row: PrescriptionRow) -> Self {
        Prescription {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            medication_name: row.medication_name,
            dosage: row.dosage,
            instructions: row.instructions,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = prescriptions)]
pub struct NewPrescriptionRow<'a> {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub medication_name: &'a str,
    pub dosage: Option<&'a str>,
    pub instructions: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
