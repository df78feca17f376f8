//! # KYC gateway server
//! This crate hosts the server code for the KYC gateway. It is responsible for:
//! Accepting applicant, document and status requests from our own clients.
//! Validating them, and relaying them to Sumsub as signed requests.
//! Passing Sumsub's answers (and errors) back to the caller.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `POST /applicant/create/`: Register a new applicant with Sumsub.
//! * `POST /applicant/upload-document/`: Upload an identity document for an applicant.
//! * `GET /applicant/{applicant_id}/status/`: Fetch an applicant's verification status.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod dto;
pub mod errors;
pub mod integrations;
pub mod kyc_api;
pub mod provider;
pub mod routes;
pub mod server;
