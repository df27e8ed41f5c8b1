//! Booking and PG-profile editing for the hlopg hostel backend.
//!
//! The booking side turns a renter's choices into a priced booking request;
//! the profile side loads an owner's PG into an always-complete draft and
//! sends edits back as a multipart update.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::ApiConfig;
pub use services::api_client::{ApiClient, HostelApi};
