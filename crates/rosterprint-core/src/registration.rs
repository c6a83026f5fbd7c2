//! Bulk registration payloads.
//!
//! A registration shares level, sport, age bracket, gender, coach and school
//! across several athletes. Entries without a name or a photo are skipped;
//! photos are read from disk and inlined as base64 data URLs.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{AthleteUpdate, Level, NewAthlete, DEFAULT_SUB_CATEGORY};

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("At least one athlete needs both a name and a photo")]
    NoCompleteEntries,

    #[error("Could not read photo {path}: {source}")]
    Photo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid entry '{0}': expected NAME;BIRTHDATE;PHOTO")]
    InvalidEntry(String),
}

/// One row of the bulk form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkEntry {
    pub name: String,
    pub birth_date: String,
    pub photo: Option<PathBuf>,
}

impl BulkEntry {
    /// Rows missing a name or photo are left out of the submission.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.photo.is_some()
    }
}

impl FromStr for BulkEntry {
    type Err = RegistrationError;

    /// Parse `NAME;BIRTHDATE;PHOTO`. Birth date and photo may be empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(';').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let birth_date = parts.next().unwrap_or_default();
        let photo = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(RegistrationError::InvalidEntry(s.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            birth_date: birth_date.to_string(),
            photo: (!photo.is_empty()).then(|| PathBuf::from(photo)),
        })
    }
}

/// A bulk registration for one sport bracket.
#[derive(Debug, Clone)]
pub struct Registration {
    pub level: Level,
    pub sport: String,
    pub age: String,
    pub gender: String,
    pub coach: String,
    pub school: String,
    pub entries: Vec<BulkEntry>,
}

impl Registration {
    fn check_required(&self) -> Result<(), RegistrationError> {
        let required = [
            ("Sport", &self.sport),
            ("Age bracket", &self.age),
            ("Gender", &self.gender),
            ("School", &self.school),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(RegistrationError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Build the `save` payload, reading and inlining each photo.
    pub fn build_payload(&self) -> Result<Vec<NewAthlete>, RegistrationError> {
        self.check_required()?;

        let complete: Vec<&BulkEntry> = self.entries.iter().filter(|e| e.is_complete()).collect();
        if complete.is_empty() {
            return Err(RegistrationError::NoCompleteEntries);
        }
        let skipped = self.entries.len() - complete.len();
        if skipped > 0 {
            info!(skipped = skipped, "Skipping entries without a name or photo");
        }

        complete
            .into_iter()
            .map(|entry| -> Result<NewAthlete, RegistrationError> {
                let image_blob = match &entry.photo {
                    Some(path) => Some(inline_photo(path)?),
                    None => None,
                };
                Ok(NewAthlete {
                    level: self.level,
                    sport_type: self.sport.trim().to_string(),
                    sub_category: DEFAULT_SUB_CATEGORY.to_string(),
                    age: self.age.trim().to_string(),
                    gender: self.gender.trim().to_string(),
                    name: entry.name.trim().to_string(),
                    birth_date: entry.birth_date.clone(),
                    school: self.school.clone(),
                    coach: self.coach.trim().to_string(),
                    image_blob,
                    image_url: String::new(),
                    note: String::new(),
                })
            })
            .collect()
    }
}

/// Attach a replacement photo to an update.
pub fn with_new_photo(mut update: AthleteUpdate, photo: &Path) -> Result<AthleteUpdate, RegistrationError> {
    update.image_blob = Some(inline_photo(photo)?);
    Ok(update)
}

/// MIME type for a photo, from its file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Read `path` and encode it as a `data:` URL.
pub fn inline_photo(path: &Path) -> Result<String, RegistrationError> {
    let bytes = std::fs::read(path).map_err(|source| RegistrationError::Photo {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "Inlining photo");
    Ok(format!("data:{};base64,{}", mime_for_path(path), B64.encode(bytes)))
}
