use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use sumsub_tools::SumsubApi;

use crate::{
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    kyc_api::KycApi,
    routes::{health, CreateApplicantRoute, UploadDocumentRoute, VerificationStatusRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let sumsub = SumsubApi::new(config.sumsub.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🪪️ Relaying verification requests to {}", config.sumsub.base_url);
    let srv = create_server_instance(config, sumsub)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, sumsub: SumsubApi) -> Result<Server, ServerError> {
    let options = ServerOptions::from_config(&config);
    let srv = HttpServer::new(move || {
        let kyc_api = KycApi::new(sumsub.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("kyc::access_log"))
            .app_data(web::Data::new(kyc_api))
            .app_data(web::Data::new(options))
            .service(health)
            .service(CreateApplicantRoute::<SumsubApi>::new())
            .service(UploadDocumentRoute::<SumsubApi>::new())
            .service(VerificationStatusRoute::<SumsubApi>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
