//! Print layout engine.
//!
//! Athletes are grouped by sport, age bracket and gender, sorted with Thai
//! collation, and cut into fixed-size pages (15 photos or 25 list rows)
//! padded with blank slots so every sheet has the same shape.

pub mod categories;
pub mod collate;
pub mod paginate;

pub use categories::{categories, Category};
pub use collate::{collation_key, compare, CollationKey};
pub use paginate::{
    group_and_paginate, group_athletes, paginate, LayoutError, LayoutMode, Page, PageCapacity,
    PrintGroup, NAME_LIST_CAPACITY, PHOTO_GRID_CAPACITY, PHOTO_GRID_COLUMNS,
};
