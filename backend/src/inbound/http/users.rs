//! User registration handlers.
//!
//! ```text
//! POST /users {"name":"Ada","email":"ada@example.com","role":"Patient"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewUser, Role, User};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, validation};

/// Request body for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
}

/// Register a user account.
///
/// The duplicate-email check is a read-before-write against the user
/// repository; the database unique constraint backs it up.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Validation failure or duplicate email", body = ApiError),
        (status = 503, description = "Store unavailable", body = ApiError)
    ),
    tags = ["users"]
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let payload = payload.into_inner();
    validation::require_non_blank("name", &payload.name)?;
    validation::validate_email(&payload.email)?;

    if state.users.find_by_email(&payload.email).await?.is_some() {
        return Err(Error::conflict("email already registered").into());
    }

    let user = state
        .users
        .insert(NewUser {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            role: payload.role,
        })
        .await?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::fixtures()))
            .service(create_user)
    }

    #[actix_web::test]
    async fn registration_echoes_the_submitted_email() {
        let app = actix_test::init_service(test_app()).await;

        let request = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "phone": "5551234",
                "role": "Patient",
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["role"], "Patient");
        assert!(body["id"].as_str().is_some());
    }

    #[actix_web::test]
    async fn duplicate_email_is_a_conflict() {
        let app = actix_test::init_service(test_app()).await;
        let payload = json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "role": "Patient",
        });

        let first = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(&payload)
            .to_request();
        assert!(actix_test::call_service(&app, first).await.status().is_success());

        let second = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(&payload)
            .to_request();
        let response = actix_test::call_service(&app, second).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "conflict");
    }

    #[actix_web::test]
    async fn malformed_email_is_rejected() {
        let app = actix_test::init_service(test_app()).await;

        let request = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({
                "name": "Ada Lovelace",
                "email": "not-an-email",
                "role": "Patient",
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], "invalid_email");
    }
}
