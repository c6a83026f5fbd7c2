//! Core library for rosterprint.
//!
//! Registers athletes for a school sports event in a spreadsheet-backed
//! store and lays them out on printable A4 sheets: photo boards of 15 and
//! name lists of 25, one set of sheets per sport / age bracket / gender.
//!
//! - [`layout`]: grouping, Thai collation and fixed-size pagination
//! - [`render`]: HTML for the photo board and name list sheets
//! - [`api`]: client for the Apps Script store
//! - [`registration`]: bulk registration payloads with inlined photos
//! - [`roster`]: table search, filtering and sorting
//! - [`catalog`]: sports offered per school level

pub mod api;
pub mod catalog;
pub mod config;
pub mod layout;
pub mod models;
pub mod registration;
pub mod render;
pub mod roster;
pub mod utils;

pub use api::{StoreClient, StoreError, StoreErrorKind};
pub use config::{Config, ConfigKey};
pub use layout::{group_and_paginate, LayoutMode, Page, PageCapacity, PrintGroup};
pub use models::{Athlete, AthleteUpdate, GroupKey, Level, NewAthlete};
pub use render::{render_document, PrintOptions};
pub use utils::format_buddhist_date;
