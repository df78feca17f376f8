//! # Sumsub tools
//!
//! A small client for the parts of the [Sumsub](https://docs.sumsub.com/reference) API that the KYC gateway needs.
//!
//! Every request is signed with the app's secret key (see [`RequestSigner`]). The client composes the URL, signs the
//! exact bytes that will be sent, sends them and classifies the response. It does not retry.

mod api;
mod config;
mod data_objects;
mod error;
pub mod multipart;
mod signer;

pub use api::{ProviderResponse, SumsubApi};
pub use config::{SumsubConfig, DEFAULT_DOCUMENT_COUNTRY, DEFAULT_LEVEL_NAME};
pub use data_objects::{DocumentMetadata, DocumentReceipt, IdDocument, NewApplicant};
pub use error::SumsubApiError;
pub use signer::{
    calculate_signature,
    RequestSigner,
    SignedHeaders,
    APP_ACCESS_SIG_HEADER,
    APP_ACCESS_TS_HEADER,
    APP_TOKEN_HEADER,
};
