//! Nurse-facing handlers: the day's schedule and vitals intake.

use actix_web::{get, post, web};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::domain::{Appointment, Error, Vitals};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::vitals::{CreateVitalsRequest, insert_reading};

/// Half-open UTC window `[00:00 of `date`, 00:00 of the next day)`.
pub(crate) fn day_window(date: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = date
        .checked_add_days(Days::new(1))?
        .and_time(NaiveTime::MIN)
        .and_utc();
    Some((start, end))
}

/// List the appointments scheduled today.
///
/// "Today" is the server's current UTC calendar day.
#[utoipa::path(
    get,
    path = "/nurse/today-appointments",
    responses((status = 200, description = "Today's appointments", body = [Appointment])),
    tags = ["nurse"]
)]
#[get("/nurse/today-appointments")]
pub async fn today_appointments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Appointment>>> {
    let today = Utc::now().date_naive();
    let (start, end) = day_window(today)
        .ok_or_else(|| Error::internal("calendar overflow computing today's window"))?;
    let appointments = state.appointments.list_between(start, end).await?;
    Ok(web::Json(appointments))
}

/// Record a vitals reading from the nurse station.
#[utoipa::path(
    post,
    path = "/nurse/vitals",
    request_body = CreateVitalsRequest,
    responses((status = 200, description = "Reading recorded", body = Vitals)),
    tags = ["nurse"]
)]
#[post("/nurse/vitals")]
pub async fn record_vitals(
    state: web::Data<HttpState>,
    payload: web::Json<CreateVitalsRequest>,
) -> ApiResult<web::Json<Vitals>> {
    let vitals = insert_reading(&state, payload.into_inner()).await?;
    Ok(web::Json(vitals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_spans_exactly_one_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date");
        let (start, end) = day_window(date).expect("window");
        assert_eq!(start.to_rfc3339(), "2026-03-14T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-03-15T00:00:00+00:00");
    }

    #[test]
    fn window_crosses_month_boundaries() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid date");
        let (start, end) = day_window(date).expect("window");
        assert_eq!(start.to_rfc3339(), "2026-01-31T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-02-01T00:00:00+00:00");
    }
}
