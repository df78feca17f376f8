//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Every handler is a single request/response exchange with the provider. Nothing is shared between requests apart
//! from the provider client, so handlers are free to run concurrently on any worker.
//!
//! Handlers must not block the worker thread. The only slow thing they do is wait on the provider, and that is
//! always `.await`ed.
use actix_multipart::Multipart;
use actix_web::{get, web, HttpResponse, Responder};
use log::*;

use crate::{
    config::ServerOptions,
    data_objects::UploadAcknowledgement,
    dto::{applicant_id_from_path, ApplicantRequest, DocumentUploadForm},
    errors::ServerError,
    kyc_api::KycApi,
    provider::VerificationProvider,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Applicants  ----------------------------------------------------
route!(create_applicant => Post "/applicant/create/" impl VerificationProvider);
/// Route handler for creating a new applicant.
///
/// The body is a JSON object with the fields
/// * `first_name`, `last_name`, `email` (required),
/// * `dob` (YYYY-MM-DD), `nationality` (ISO 3166-1 alpha-3) and `phone` (optional).
///
/// Invalid payloads are rejected with a 400 listing the problem with each field, without contacting the provider.
/// On success, the provider's applicant record is returned verbatim with a 201 status.
pub async fn create_applicant<P>(body: web::Bytes, api: web::Data<KycApi<P>>) -> Result<HttpResponse, ServerError>
where P: VerificationProvider {
    trace!("💻️ Received create applicant request");
    let applicant = ApplicantRequest::from_slice(&body)?.validate().map_err(|e| {
        debug!("💻️ Create applicant request failed validation. {e}");
        ServerError::ValidationError(e)
    })?;
    let record = api.create_applicant(applicant).await?;
    Ok(HttpResponse::Created().json(record))
}

route!(upload_document => Post "/applicant/upload-document/" impl VerificationProvider);
/// Route handler for uploading an identity document.
///
/// Expects `multipart/form-data` with the text fields `applicant_id`, `doc_type` (e.g. PASSPORT), `doc_subtype`
/// (e.g. FRONT_SIDE), an optional `country`, and the file itself in `document_file`.
///
/// The document is forwarded to the provider in a single request and is not kept.
pub async fn upload_document<P>(
    payload: Multipart,
    api: web::Data<KycApi<P>>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError>
where
    P: VerificationProvider,
{
    trace!("💻️ Received document upload request");
    let form = DocumentUploadForm::from_multipart(payload, options.max_upload_bytes).await?;
    let document = form.validate().map_err(|e| {
        debug!("💻️ Document upload failed validation. {e}");
        ServerError::ValidationError(e)
    })?;
    let receipt = api.upload_document(document).await?;
    Ok(HttpResponse::Ok().json(UploadAcknowledgement::from(receipt)))
}

route!(verification_status => Get "/applicant/{applicant_id}/status/" impl VerificationProvider);
/// Route handler for fetching an applicant's verification status. The provider's status payload is returned as-is.
pub async fn verification_status<P>(
    path: web::Path<String>,
    api: web::Data<KycApi<P>>,
) -> Result<HttpResponse, ServerError>
where
    P: VerificationProvider,
{
    trace!("💻️ Received status request for applicant {}", path.as_str());
    let applicant_id = applicant_id_from_path(path.into_inner())?;
    let status = api.verification_status(&applicant_id).await?;
    Ok(HttpResponse::Ok().json(status))
}
