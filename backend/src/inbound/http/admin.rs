//! Admin-facing handlers: aggregate stats and full listings.

use actix_web::{get, web};
use chrono::Utc;

use crate::domain::{Appointment, ClinicStats, Role, User, Vitals};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Aggregate counters for the admin overview.
///
/// Counts are gathered with independent reads, so the totals are not a
/// single consistent snapshot under concurrent writes.
#[utoipa::path(
    get,
    path = "/admin/stats",
    responses((status = 200, description = "System counters", body = ClinicStats)),
    tags = ["admin"]
)]
#[get("/admin/stats")]
pub async fn stats(state: web::Data<HttpState>) -> ApiResult<web::Json<ClinicStats>> {
    let mut stats = ClinicStats {
        total_users: state.users.count().await?,
        total_patients: state.patients.count().await?,
        total_appointments: state.appointments.count().await?,
        upcoming_appointments: state.appointments.count_from(Utc::now()).await?,
        total_vitals: state.vitals.count().await?,
        ..ClinicStats::default()
    };

    for role in Role::ALL {
        let count = state.users.count_by_role(role).await?;
        stats.roles.insert(role.as_str().to_owned(), count);
    }
    stats.total_doctors = stats.roles.get(Role::Doctor.as_str()).copied().unwrap_or(0);
    stats.total_nurses = stats.roles.get(Role::Nurse.as_str()).copied().unwrap_or(0);

    Ok(web::Json(stats))
}

/// List every registered user.
#[utoipa::path(
    get,
    path = "/admin/users",
    responses((status = 200, description = "All users", body = [User])),
    tags = ["admin"]
)]
#[get("/admin/users")]
pub async fn all_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(web::Json(users))
}

/// List every appointment.
#[utoipa::path(
    get,
    path = "/admin/appointments",
    responses((status = 200, description = "All appointments", body = [Appointment])),
    tags = ["admin"]
)]
#[get("/admin/appointments")]
pub async fn all_appointments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Appointment>>> {
    let appointments = state.appointments.list().await?;
    Ok(web::Json(appointments))
}

/// List every vitals reading.
#[utoipa::path(
    get,
    path = "/admin/vitals",
    responses((status = 200, description = "All vitals readings", body = [Vitals])),
    tags = ["admin"]
)]
#[get("/admin/vitals")]
pub async fn all_vitals(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Vitals>>> {
    let readings = state.vitals.list().await?;
    Ok(web::Json(readings))
}
