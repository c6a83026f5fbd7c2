use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::{format_buddhist_date, split_name};

use super::Level;

/// Label given to a missing sport, age bracket or gender when grouping.
/// One sentinel for all three keeps blank cells from producing several
/// distinct "empty" groups.
pub const UNSPECIFIED: &str = "ไม่ระบุ";

/// Trim a grouping field, substituting [`UNSPECIFIED`] when it is blank.
pub fn or_unspecified(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sub-category the registration form always submits.
pub const DEFAULT_SUB_CATEGORY: &str = "ทั่วไป";

/// Spreadsheet cells come back as strings, numbers or nulls depending on how
/// they were typed in; normalize all of them to a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// One registered athlete as stored by the spreadsheet backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Athlete {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub level: String,
    #[serde(rename = "sportType", default, deserialize_with = "lenient_string")]
    pub sport_type: String,
    #[serde(rename = "subCategory", default, deserialize_with = "lenient_string")]
    pub sub_category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: String,
    #[serde(rename = "birthDate", default, deserialize_with = "lenient_string")]
    pub birth_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub school: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub coach: String,
    #[serde(rename = "imageUrl", default, deserialize_with = "lenient_string")]
    pub image_url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub note: String,
}

impl Athlete {
    pub fn group_key(&self) -> GroupKey {
        GroupKey::new(&self.sport_type, &self.age, &self.gender)
    }

    pub fn first_name(&self) -> &str {
        split_name(&self.name).0
    }

    pub fn last_name(&self) -> &str {
        split_name(&self.name).1
    }

    pub fn has_photo(&self) -> bool {
        !self.image_url.trim().is_empty()
    }

    /// Birth date in `DD/MM/YYYY` Buddhist Era form, or the raw value if it
    /// isn't a date.
    pub fn birth_date_display(&self) -> String {
        format_buddhist_date(&self.birth_date)
    }

    /// Sport and age bracket the way the roster table shows them.
    pub fn category_display(&self) -> String {
        let key = self.group_key();
        format!("{} ({} ปี)", key.sport, key.age)
    }
}

/// The sport / age bracket / gender triple that decides which printed sheet
/// an athlete lands on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub sport: String,
    pub age: String,
    pub gender: String,
}

impl GroupKey {
    /// Build a key, substituting [`UNSPECIFIED`] for blank fields.
    pub fn new(sport: &str, age: &str, gender: &str) -> Self {
        Self {
            sport: or_unspecified(sport),
            age: or_unspecified(age),
            gender: or_unspecified(gender),
        }
    }

    /// `sport|age|gender`, the string groups are ordered by.
    pub fn composite(&self) -> String {
        format!("{}|{}|{}", self.sport, self.age, self.gender)
    }

    /// Human-readable label printed in page footers.
    pub fn label(&self) -> String {
        format!("{} {}ปี {}", self.sport, self.age, self.gender)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.composite())
    }
}

/// Payload for one athlete in a bulk `save` call. The photo travels inline
/// as a data URL in `imageBlob`; the store uploads it and fills `imageUrl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewAthlete {
    pub level: Level,
    #[serde(rename = "sportType")]
    pub sport_type: String,
    #[serde(rename = "subCategory")]
    pub sub_category: String,
    pub age: String,
    pub gender: String,
    pub name: String,
    #[serde(rename = "birthDate")]
    pub birth_date: String,
    pub school: String,
    pub coach: String,
    #[serde(rename = "imageBlob")]
    pub image_blob: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub note: String,
}

/// Payload for an `update` call: every editable field, plus a replacement
/// photo when one was chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AthleteUpdate {
    pub level: String,
    #[serde(rename = "sportType")]
    pub sport_type: String,
    #[serde(rename = "subCategory")]
    pub sub_category: String,
    pub age: String,
    pub gender: String,
    pub name: String,
    #[serde(rename = "birthDate")]
    pub birth_date: String,
    pub school: String,
    pub coach: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub note: String,
    #[serde(rename = "imageBlob", skip_serializing_if = "Option::is_none", default)]
    pub image_blob: Option<String>,
}

impl From<&Athlete> for AthleteUpdate {
    fn from(athlete: &Athlete) -> Self {
        Self {
            level: athlete.level.clone(),
            sport_type: athlete.sport_type.clone(),
            sub_category: athlete.sub_category.clone(),
            age: athlete.age.clone(),
            gender: athlete.gender.clone(),
            name: athlete.name.clone(),
            birth_date: athlete.birth_date.clone(),
            school: athlete.school.clone(),
            coach: athlete.coach.clone(),
            image_url: athlete.image_url.clone(),
            note: athlete.note.clone(),
            image_blob: None,
        }
    }
}
