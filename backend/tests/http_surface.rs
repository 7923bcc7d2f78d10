//! End-to-end coverage of the HTTP surface over fixture-backed state.
//!
//! Exercises the full route table exactly as the server wires it, with the
//! in-memory repositories standing in for PostgreSQL.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use chrono::{DateTime, Days, Utc};
use serde_json::{Value, json};

use careconnect::inbound::http::health::HealthState;
use careconnect::inbound::http::state::HttpState;
use careconnect::server::build_app;

async fn fixture_service() -> (
    impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    web::Data<HealthState>,
) {
    let state = web::Data::new(HttpState::fixtures());
    let health = web::Data::new(HealthState::new());
    let app = actix_test::init_service(build_app(state, health.clone())).await;
    (app, health)
}

async fn post_json(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
    body: &Value,
) -> ServiceResponse {
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

async fn get(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
) -> ServiceResponse {
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    actix_test::call_service(app, request).await
}

async fn json_body(response: ServiceResponse) -> Value {
    actix_test::read_body_json(response).await
}

async fn register_user(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    role: &str,
) -> String {
    let response = post_json(
        app,
        "/users",
        &json!({ "name": "Test User", "email": email, "role": role }),
    )
    .await;
    assert!(response.status().is_success());
    let body = json_body(response).await;
    body["id"].as_str().expect("user id").to_owned()
}

async fn register_patient(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
) -> String {
    let user_id = register_user(app, email, "Patient").await;
    let response = post_json(app, "/patients", &json!({ "user_id": user_id, "age": 30 })).await;
    assert!(response.status().is_success());
    let body = json_body(response).await;
    body["id"].as_str().expect("patient id").to_owned()
}

async fn book_appointment(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    patient_id: &str,
    doctor_id: &str,
    scheduled_time: DateTime<Utc>,
) -> Value {
    let response = post_json(
        app,
        "/appointments",
        &json!({
            "patient_id": &patient_id,
            "doctor_id": &doctor_id,
            "department": "General",
            "scheduled_time": scheduled_time.to_rfc3339(),
        }),
    )
    .await;
    assert!(response.status().is_success());
    json_body(response).await
}

#[actix_web::test]
async fn user_creation_conflicts_on_duplicate_email() {
    let (app, _) = fixture_service().await;

    let payload = json!({ "name": "Ada Lovelace", "email": "ada@example.com", "role": "Patient" });
    let response = post_json(&app, "/users", &payload).await;
    assert!(response.status().is_success());
    let body = json_body(response).await;
    assert_eq!(body["email"], "ada@example.com");

    let response = post_json(&app, "/users", &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "conflict");
}

#[actix_web::test]
async fn patient_profile_creation_checks_user_and_uniqueness() {
    let (app, _) = fixture_service().await;

    // No such user yet.
    let response = post_json(
        &app,
        "/patients",
        &json!({ "user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["code"], "not_found");

    let user_id = register_user(&app, "pat@example.com", "Patient").await;
    let response = post_json(&app, "/patients", &json!({ "user_id": &user_id, "age": 41 })).await;
    assert!(response.status().is_success());
    let profile = json_body(response).await;
    assert_eq!(profile["user_id"].as_str(), Some(user_id.as_str()));

    // One profile per user.
    let response = post_json(&app, "/patients", &json!({ "user_id": &user_id })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "conflict");

    // Profile fetch round-trip plus a miss.
    let patient_id = profile["id"].as_str().expect("patient id");
    let response = get(&app, &format!("/patients/{patient_id}")).await;
    assert!(response.status().is_success());
    let response = get(&app, "/patients/3fa85f64-5717-4562-b3fc-2c963f66afa6").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn patient_appointments_are_listed_newest_first() {
    let (app, _) = fixture_service().await;
    let patient_id = register_patient(&app, "order@example.com").await;
    let doctor_id = register_user(&app, "doc@example.com", "Doctor").await;

    let t1 = Utc::now() + Days::new(1);
    let t2 = Utc::now() + Days::new(2);
    book_appointment(&app, &patient_id, &doctor_id, t1).await;
    book_appointment(&app, &patient_id, &doctor_id, t2).await;

    let response = get(&app, &format!("/appointments/patient/{patient_id}")).await;
    assert!(response.status().is_success());
    let listed = json_body(response).await;
    let listed = listed.as_array().expect("array");
    assert_eq!(listed.len(), 2);

    let first: DateTime<Utc> = listed[0]["scheduled_time"]
        .as_str()
        .expect("time")
        .parse()
        .expect("rfc3339");
    let second: DateTime<Utc> = listed[1]["scheduled_time"]
        .as_str()
        .expect("time")
        .parse()
        .expect("rfc3339");
    assert!(first > second, "expected newest-first ordering");
}

#[actix_web::test]
async fn appointment_status_is_forced_to_scheduled() {
    let (app, _) = fixture_service().await;
    let patient_id = register_patient(&app, "forced@example.com").await;
    let doctor_id = register_user(&app, "forced-doc@example.com", "Doctor").await;

    // A status in the payload is ignored, not honoured.
    let response = post_json(
        &app,
        "/appointments",
        &json!({
            "patient_id": &patient_id,
            "doctor_id": &doctor_id,
            "scheduled_time": (Utc::now() + Days::new(1)).to_rfc3339(),
            "status": "Completed",
        }),
    )
    .await;
    assert!(response.status().is_success());
    let body = json_body(response).await;
    assert_eq!(body["status"], "Scheduled");
}

#[actix_web::test]
async fn vitals_round_trip_preserves_fields() {
    let (app, _) = fixture_service().await;
    let patient_id = register_patient(&app, "vitals@example.com").await;

    let response = post_json(
        &app,
        "/vitals",
        &json!({
            "patient_id": &patient_id,
            "temperature": "38.2",
            "pulse": "96",
            "blood_pressure": "120/80",
            "oxygen": "97",
            "notes": "post-op check",
        }),
    )
    .await;
    assert!(response.status().is_success());

    let response = get(&app, &format!("/vitals/{patient_id}")).await;
    assert!(response.status().is_success());
    let listed = json_body(response).await;
    let listed = listed.as_array().expect("array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["temperature"], "38.2");
    assert_eq!(listed[0]["pulse"], "96");
    assert_eq!(listed[0]["blood_pressure"], "120/80");
    assert_eq!(listed[0]["oxygen"], "97");
    assert_eq!(listed[0]["notes"], "post-op check");

    // The nurse route records into the same store.
    let response = post_json(
        &app,
        "/nurse/vitals",
        &json!({
            "patient_id": &patient_id,
            "temperature": "36.9",
            "pulse": "72",
            "blood_pressure": "118/76",
            "oxygen": "99",
        }),
    )
    .await;
    assert!(response.status().is_success());

    let response = get(&app, &format!("/vitals/{patient_id}")).await;
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().expect("array").len(), 2);
}

#[actix_web::test]
async fn todays_window_filters_out_later_days() {
    let (app, _) = fixture_service().await;
    let patient_id = register_patient(&app, "today@example.com").await;
    let doctor_id = register_user(&app, "today-doc@example.com", "Doctor").await;

    let today = book_appointment(&app, &patient_id, &doctor_id, Utc::now()).await;
    book_appointment(&app, &patient_id, &doctor_id, Utc::now() + Days::new(3)).await;

    let response = get(&app, "/nurse/today-appointments").await;
    assert!(response.status().is_success());
    let listed = json_body(response).await;
    let listed = listed.as_array().expect("array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], today["id"]);
}

#[actix_web::test]
async fn doctor_views_cover_appointments_patients_and_records() {
    let (app, _) = fixture_service().await;
    let doctor_id = register_user(&app, "dr@example.com", "Doctor").await;
    let first_patient = register_patient(&app, "first@example.com").await;
    let second_patient = register_patient(&app, "second@example.com").await;

    // Two appointments with the first patient, one with the second.
    book_appointment(&app, &first_patient, &doctor_id, Utc::now() + Days::new(1)).await;
    book_appointment(&app, &first_patient, &doctor_id, Utc::now() + Days::new(2)).await;
    book_appointment(&app, &second_patient, &doctor_id, Utc::now() + Days::new(3)).await;

    let response = get(&app, &format!("/doctor/{doctor_id}/appointments")).await;
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().expect("array").len(), 3);

    // Distinct patients, in first-seen order.
    let response = get(&app, &format!("/doctor/{doctor_id}/patients")).await;
    let listed = json_body(response).await;
    let listed = listed.as_array().expect("array");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"].as_str(), Some(first_patient.as_str()));
    assert_eq!(listed[1]["id"].as_str(), Some(second_patient.as_str()));

    // A blank summary is a validation failure.
    let response = post_json(
        &app,
        "/doctor/diagnosis",
        &json!({
            "patient_id": &first_patient,
            "doctor_id": &doctor_id,
            "summary": "  ",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"]["field"], "summary");

    let response = post_json(
        &app,
        "/doctor/diagnosis",
        &json!({
            "patient_id": &first_patient,
            "doctor_id": &doctor_id,
            "summary": "Acute bronchitis",
            "details": "Productive cough for ten days.",
        }),
    )
    .await;
    assert!(response.status().is_success());

    let response = post_json(
        &app,
        "/doctor/prescription",
        &json!({
            "patient_id": &first_patient,
            "doctor_id": &doctor_id,
            "medication_name": "Amoxicillin",
            "dosage": "500 mg BID",
            "start_date": "2026-03-14",
            "end_date": "2026-03-21",
        }),
    )
    .await;
    assert!(response.status().is_success());

    let response = get(&app, &format!("/doctor/{doctor_id}/diagnoses")).await;
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);
    assert_eq!(listed[0]["summary"], "Acute bronchitis");

    let response = get(&app, &format!("/doctor/{doctor_id}/prescriptions")).await;
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);
    assert_eq!(listed[0]["medication_name"], "Amoxicillin");
}

#[actix_web::test]
async fn admin_stats_count_roles_and_upcoming_appointments() {
    let (app, _) = fixture_service().await;
    let patient_id = register_patient(&app, "stats-pat@example.com").await;
    let doctor_id = register_user(&app, "stats-doc@example.com", "Doctor").await;
    register_user(&app, "stats-nurse@example.com", "Nurse").await;

    book_appointment(&app, &patient_id, &doctor_id, Utc::now() + Days::new(2)).await;
    book_appointment(&app, &patient_id, &doctor_id, Utc::now() - Days::new(2)).await;

    post_json(
        &app,
        "/vitals",
        &json!({
            "patient_id": &patient_id,
            "temperature": "37.0",
            "pulse": "80",
            "blood_pressure": "120/80",
            "oxygen": "98",
        }),
    )
    .await;

    let response = get(&app, "/admin/stats").await;
    assert!(response.status().is_success());
    let stats = json_body(response).await;
    assert_eq!(stats["total_users"], 3);
    assert_eq!(stats["total_patients"], 1);
    assert_eq!(stats["total_doctors"], 1);
    assert_eq!(stats["total_nurses"], 1);
    assert_eq!(stats["total_appointments"], 2);
    assert_eq!(stats["upcoming_appointments"], 1);
    assert_eq!(stats["total_vitals"], 1);
    assert_eq!(stats["roles"]["Patient"], 1);
    assert_eq!(stats["roles"]["Admin"], 0);

    let response = get(&app, "/admin/users").await;
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().expect("array").len(), 3);

    let response = get(&app, "/admin/appointments").await;
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().expect("array").len(), 2);

    let response = get(&app, "/admin/vitals").await;
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);
}

#[actix_web::test]
async fn assistant_matches_rules_and_always_adds_the_disclaimer() {
    let (app, _) = fixture_service().await;

    let response = post_json(
        &app,
        "/ai/diagnosis-assistant",
        &json!({ "symptoms": "I have a fever and a cough" }),
    )
    .await;
    assert!(response.status().is_success());
    let body = json_body(response).await;
    let conditions = body["possible_conditions"].as_array().expect("array");
    assert!(
        conditions
            .iter()
            .any(|c| c == "Viral or bacterial respiratory infection")
    );
    assert_eq!(
        body["advice"],
        "This is not medical advice. Please consult a real doctor."
    );

    let response = post_json(
        &app,
        "/ai/diagnosis-assistant",
        &json!({ "symptoms": "I feel generally unwell" }),
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(
        body["possible_conditions"],
        json!(["General / non-specific illness – further evaluation needed"])
    );
}

#[actix_web::test]
async fn intake_chat_returns_one_canned_question_per_call() {
    let (app, _) = fixture_service().await;

    let response = post_json(
        &app,
        "/ai/intake-chat",
        &json!({ "message": "I have a headache" }),
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(
        body["reply"],
        "Can you describe your main symptom, when it started, and what makes it better or worse?"
    );

    let response = post_json(
        &app,
        "/ai/intake-chat",
        &json!({ "message": "my chest hurts with pain" }),
    )
    .await;
    let body = json_body(response).await;
    assert_eq!(
        body["reply"],
        "Where is the pain located and how severe is it from 1 to 10?"
    );
}

#[actix_web::test]
async fn banner_and_probes_respond() {
    let (app, health) = fixture_service().await;

    let response = get(&app, "/").await;
    assert!(response.status().is_success());
    let body = json_body(response).await;
    assert_eq!(body["message"], "CareConnect backend is running");

    let response = get(&app, "/health/live").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Not ready until startup marks it so.
    let response = get(&app, "/health/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    health.mark_ready();
    let response = get(&app, "/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}
