//! Client for the spreadsheet-backed athlete store.
//!
//! `StoreClient` talks to a Google Apps Script web app that keeps athletes
//! in a sheet and photos in Drive. Every call returns `Result<_, StoreError>`.

pub mod client;
pub mod error;

pub use client::StoreClient;
pub use error::{StoreError, StoreErrorKind};
