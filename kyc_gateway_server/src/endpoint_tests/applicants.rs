use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;
use sumsub_tools::SumsubApiError;

use super::{
    helpers::{json, send_request},
    mocks::MockProvider,
};

#[actix_web::test]
async fn create_applicant() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider
        .expect_create_applicant()
        .withf(|a| a.first_name == "Jane" && a.last_name == "Doe" && a.email == "jane@example.com")
        .times(1)
        .returning(|_| Ok(json!({"id": "abc123"})));
    let req = TestRequest::post()
        .uri("/applicant/create/")
        .set_json(json!({"first_name": "Jane", "last_name": "Doe", "email": "jane@example.com"}));
    let (status, body) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json(&body), json!({"id": "abc123"}));
}

#[actix_web::test]
async fn provider_record_is_relayed_unmodified() {
    let _ = env_logger::try_init().ok();
    let record = json!({
        "id": "5b594ade0a975a36c9349e66",
        "createdAt": "2024-06-01 10:00:00",
        "externalUserId": "c2c4a6d2-5a4e-4a55-9f2b-7a4d3b0a1a11",
        "review": {"reviewStatus": "init"},
        "type": "individual"
    });
    let expected = record.clone();
    let mut provider = MockProvider::new();
    provider
        .expect_create_applicant()
        .withf(|a| a.dob.is_some() && a.nationality.as_deref() == Some("DEU") && a.phone.is_some())
        .times(1)
        .returning(move |_| Ok(record.clone()));
    let req = TestRequest::post().uri("/applicant/create/").set_json(json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "email": "jane@example.com",
        "dob": "1990-02-03",
        "nationality": "DEU",
        "phone": "+4915112345678"
    }));
    let (status, body) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json(&body), expected);
}

#[actix_web::test]
async fn missing_field_never_reaches_the_provider() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_create_applicant().never();
    let req = TestRequest::post()
        .uri("/applicant/create/")
        .set_json(json!({"first_name": "Jane", "email": "jane@example.com"}));
    let (status, body) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json(&body);
    assert_eq!(body["fields"], json!({"last_name": ["This field is required."]}));
}

#[actix_web::test]
async fn invalid_email() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_create_applicant().never();
    let req = TestRequest::post()
        .uri("/applicant/create/")
        .set_json(json!({"first_name": "Jane", "last_name": "Doe", "email": "jane-at-example.com"}));
    let (status, body) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["fields"]["email"], json!(["Enter a valid email address."]));
}

#[actix_web::test]
async fn malformed_json() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_create_applicant().never();
    let req = TestRequest::post()
        .uri("/applicant/create/")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"first_name\": ");
    let (status, body) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json(&body)["fields"]["non_field_errors"].is_array());
}

#[actix_web::test]
async fn provider_rejection_is_relayed() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_create_applicant().times(1).returning(|_| {
        Err(SumsubApiError::Rejected {
            status: 409,
            payload: json!({"description": "Applicant with external user id already exists", "code": 409}),
        })
    });
    let req = TestRequest::post()
        .uri("/applicant/create/")
        .set_json(json!({"first_name": "Jane", "last_name": "Doe", "email": "jane@example.com"}));
    let (status, body) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let body = json(&body);
    assert_eq!(body["provider_status"], 409);
    assert_eq!(body["details"]["description"], "Applicant with external user id already exists");
}

#[actix_web::test]
async fn provider_unreachable() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider
        .expect_create_applicant()
        .times(1)
        .returning(|_| Err(SumsubApiError::Connectivity("connection refused".into())));
    let req = TestRequest::post()
        .uri("/applicant/create/")
        .set_json(json!({"first_name": "Jane", "last_name": "Doe", "email": "jane@example.com"}));
    let (status, body) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json(&body)["error"], "Could not reach the verification provider. connection refused");
}
