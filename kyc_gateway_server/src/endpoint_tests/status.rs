use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;
use sumsub_tools::SumsubApiError;

use super::{
    helpers::{json, send_request},
    mocks::MockProvider,
};

#[actix_web::test]
async fn fetch_status() {
    let _ = env_logger::try_init().ok();
    let payload = json!({
        "reviewStatus": "completed",
        "reviewResult": {"reviewAnswer": "GREEN"},
        "createDate": "2024-06-01 10:00:00"
    });
    let expected = payload.clone();
    let mut provider = MockProvider::new();
    provider
        .expect_get_verification_status()
        .withf(|id| id == "abc123")
        .times(1)
        .returning(move |_| Ok(payload.clone()));
    let req = TestRequest::get().uri("/applicant/abc123/status/");
    let (status, body) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), expected);
}

#[actix_web::test]
async fn unknown_applicant() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_get_verification_status().times(1).returning(|_| {
        Err(SumsubApiError::Rejected {
            status: 404,
            payload: json!({"description": "Applicant not found", "code": 404}),
        })
    });
    let req = TestRequest::get().uri("/applicant/nobody/status/");
    let (status, body) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body = json(&body);
    assert_eq!(body["error"], "The data was not found. Applicant nobody does not exist");
    assert_eq!(body["details"]["description"], "Applicant not found");
}

#[actix_web::test]
async fn garbled_provider_response() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider
        .expect_get_verification_status()
        .times(1)
        .returning(|_| Err(SumsubApiError::ResponseFormat("expected value at line 1 column 1".into())));
    let req = TestRequest::get().uri("/applicant/abc123/status/");
    let (status, _) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn status_route_only_accepts_get() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_get_verification_status().never();
    let req = TestRequest::post().uri("/applicant/abc123/status/");
    let (status, _) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn dot_segment_applicant_ids_are_rejected() {
    let _ = env_logger::try_init().ok();
    for uri in ["/applicant/%2E%2E/status/", "/applicant/%2e/status/"] {
        let mut provider = MockProvider::new();
        provider.expect_get_verification_status().never();
        let (status, body) = send_request(TestRequest::get().uri(uri), provider).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json(&body)["fields"], json!({"applicant_id": ["Enter a valid applicant id."]}));
    }
}
