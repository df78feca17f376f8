use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;
use sumsub_tools::{multipart::MultipartBody, DocumentReceipt, SumsubApiError};

use super::{
    helpers::{json, send_request, TEST_UPLOAD_LIMIT},
    mocks::MockProvider,
};

const JPEG: [u8; 6] = [0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10];

fn upload_request(form: MultipartBody) -> TestRequest {
    let (content_type, body) = form.finish();
    TestRequest::post()
        .uri("/applicant/upload-document/")
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
}

fn passport_form(applicant_id: &str, doc_type: &str) -> MultipartBody {
    MultipartBody::new()
        .text("applicant_id", applicant_id)
        .text("doc_type", doc_type)
        .text("doc_subtype", "FRONT_SIDE")
        .file("document_file", "passport.jpg", "image/jpeg", &JPEG)
}

#[actix_web::test]
async fn upload_document() {
    let _ = env_logger::try_init().ok();
    let provider_body = json!({"idDocType": "PASSPORT", "country": "NGA", "warnings": []});
    let expected = provider_body.clone();
    let mut provider = MockProvider::new();
    provider
        .expect_add_document()
        .withf(|d| {
            d.applicant_id == "abc123" &&
                d.doc_type == "PASSPORT" &&
                d.doc_subtype == "FRONT_SIDE" &&
                d.country.is_none() &&
                d.file_name == "passport.jpg" &&
                d.content_type == "image/jpeg" &&
                d.content == JPEG
        })
        .times(1)
        .returning(move |_| Ok(DocumentReceipt { image_id: Some("1234567".into()), body: provider_body.clone() }));
    let (status, body) = send_request(upload_request(passport_form("abc123", "PASSPORT")), provider).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "Document uploaded");
    assert_eq!(body["image_id"], "1234567");
    assert_eq!(body["provider_response"], expected);
}

#[actix_web::test]
async fn missing_applicant_id() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_add_document().never();
    let form = MultipartBody::new()
        .text("doc_type", "PASSPORT")
        .text("doc_subtype", "FRONT_SIDE")
        .file("document_file", "passport.jpg", "image/jpeg", &JPEG);
    let (status, body) = send_request(upload_request(form), provider).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["fields"], json!({"applicant_id": ["This field is required."]}));
}

#[actix_web::test]
async fn dot_segment_applicant_id() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_add_document().never();
    let (status, body) = send_request(upload_request(passport_form("..", "PASSPORT")), provider).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["fields"], json!({"applicant_id": ["Enter a valid applicant id."]}));
}

#[actix_web::test]
async fn missing_file() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_add_document().never();
    let form = MultipartBody::new()
        .text("applicant_id", "abc123")
        .text("doc_type", "PASSPORT")
        .text("doc_subtype", "FRONT_SIDE");
    let (status, body) = send_request(upload_request(form), provider).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["fields"], json!({"document_file": ["This field is required."]}));
}

#[actix_web::test]
async fn unsupported_document_type_is_relayed() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_add_document().times(1).returning(|_| {
        Err(SumsubApiError::Rejected {
            status: 400,
            payload: json!({"description": "Unsupported document type: LIBRARY_CARD", "code": 400}),
        })
    });
    let (status, body) = send_request(upload_request(passport_form("abc123", "LIBRARY_CARD")), provider).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json(&body);
    assert_eq!(body["provider_status"], 400);
    assert_eq!(body["details"], json!({"description": "Unsupported document type: LIBRARY_CARD", "code": 400}));
}

#[actix_web::test]
async fn oversized_upload() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_add_document().never();
    let big = vec![0u8; TEST_UPLOAD_LIMIT + 1];
    let form = MultipartBody::new()
        .text("applicant_id", "abc123")
        .text("doc_type", "PASSPORT")
        .text("doc_subtype", "FRONT_SIDE")
        .file("document_file", "passport.jpg", "image/jpeg", &big);
    let (status, _) = send_request(upload_request(form), provider).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[actix_web::test]
async fn not_a_multipart_request() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_add_document().never();
    let req = TestRequest::post()
        .uri("/applicant/upload-document/")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(r#"{"applicant_id": "abc123"}"#);
    let (status, _) = send_request(req, provider).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
