//! Data models for athlete registration.
//!
//! - `Athlete`: one registered participant as stored in the spreadsheet
//! - `NewAthlete`, `AthleteUpdate`: payloads sent to the store
//! - `GroupKey`: sport / age bracket / gender triple used to group print pages
//! - `Level`: school level a sport is offered at

pub mod athlete;
pub mod level;

pub use athlete::{
    or_unspecified, Athlete, AthleteUpdate, GroupKey, NewAthlete, DEFAULT_SUB_CATEGORY, UNSPECIFIED,
};
pub use level::Level;
