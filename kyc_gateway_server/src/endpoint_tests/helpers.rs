use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, App};
use log::debug;
use serde_json::Value;

use super::mocks::MockProvider;
use crate::{
    config::ServerOptions,
    kyc_api::KycApi,
    routes::{CreateApplicantRoute, UploadDocumentRoute, VerificationStatusRoute},
};

/// The upload limit used by endpoint tests. Small, so that the limit itself can be tested cheaply.
pub const TEST_UPLOAD_LIMIT: usize = 4096;

/// Sends `req` to an app with all the gateway routes, backed by `provider`. Returns the status and the body.
pub async fn send_request(req: TestRequest, provider: MockProvider) -> (StatusCode, String) {
    let app = App::new()
        .app_data(web::Data::new(KycApi::new(provider)))
        .app_data(web::Data::new(ServerOptions { max_upload_bytes: TEST_UPLOAD_LIMIT }))
        .service(CreateApplicantRoute::<MockProvider>::new())
        .service(UploadDocumentRoute::<MockProvider>::new())
        .service(VerificationStatusRoute::<MockProvider>::new());
    let service = test::init_service(app).await;
    debug!("Making request");
    let (_, res) = test::call_service(&service, req.to_request()).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("Response is not JSON ({e}): {body}"))
}
