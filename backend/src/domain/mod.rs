//! Domain entities, the triage rule engine, and repository ports.
//!
//! Everything in this module is transport agnostic: inbound adapters map the
//! [`Error`] type to HTTP responses and outbound adapters implement the
//! repository ports in [`ports`].

mod appointment;
mod error;
mod patient;
mod records;
mod stats;
pub mod triage;
mod user;
mod vitals;

pub mod ports;

pub use self::appointment::{Appointment, AppointmentStatus, NewAppointment, UnknownStatus};
pub use self::error::{Error, ErrorCode};
pub use self::patient::{NewPatient, Patient};
pub use self::records::{Diagnosis, NewDiagnosis, NewPrescription, Prescription};
pub use self::stats::ClinicStats;
pub use self::user::{NewUser, Role, UnknownRole, User};
pub use self::vitals::{NewVitals, Vitals};

/// Convenient domain result alias.
pub type DomainResult<T> = Result<T, Error>;
