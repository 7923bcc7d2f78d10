//! Server construction and wiring.

mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, index, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{
    admin, appointments, assistant, doctor, nurse, patients, users, vitals,
};
use crate::outbound::persistence::{
    DbPool, DieselAppointmentRepository, DieselDiagnosisRepository, DieselPatientRepository,
    DieselPrescriptionRepository, DieselUserRepository, DieselVitalsRepository, run_migrations,
};

/// Build the HTTP state over database-backed adapters sharing one pool.
fn build_http_state(pool: &DbPool) -> HttpState {
    HttpState {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        patients: Arc::new(DieselPatientRepository::new(pool.clone())),
        appointments: Arc::new(DieselAppointmentRepository::new(pool.clone())),
        vitals: Arc::new(DieselVitalsRepository::new(pool.clone())),
        diagnoses: Arc::new(DieselDiagnosisRepository::new(pool.clone())),
        prescriptions: Arc::new(DieselPrescriptionRepository::new(pool.clone())),
    }
}

/// Assemble the application: every route plus the shared state.
///
/// Takes the state as `web::Data` so tests can pass fixture-backed bundles.
pub fn build_app(
    state: web::Data<HttpState>,
    health: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .app_data(health)
        .service(index)
        .service(live)
        .service(ready)
        .service(users::create_user)
        .service(patients::create_patient)
        .service(patients::get_patient)
        .service(appointments::create_appointment)
        .service(appointments::patient_appointments)
        .service(doctor::doctor_appointments)
        .service(doctor::doctor_patients)
        .service(doctor::create_diagnosis)
        .service(doctor::doctor_diagnoses)
        .service(doctor::create_prescription)
        .service(doctor::doctor_prescriptions)
        .service(nurse::today_appointments)
        .service(nurse::record_vitals)
        .service(vitals::record_vitals)
        .service(vitals::patient_vitals)
        .service(admin::stats)
        .service(admin::all_users)
        .service(admin::all_appointments)
        .service(admin::all_vitals)
        .service(assistant::diagnosis_assistant)
        .service(assistant::intake_chat);

    #[cfg(debug_assertions)]
    let app = app
        .service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Run the server: apply migrations, build the pool and state, then serve.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    run_migrations(&config.database_url).map_err(std::io::Error::other)?;

    let pool = DbPool::connect(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;

    let state = web::Data::new(build_http_state(&pool));
    let health = web::Data::new(HealthState::new());
    let server_health = health.clone();
    let server = HttpServer::new(move || build_app(state.clone(), server_health.clone()))
        .bind(config.bind_addr)?;

    health.mark_ready();
    info!(addr = %config.bind_addr, "backend listening");
    server.run().await
}
