use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// School level a sport is offered at. Serialized with the Thai labels the
/// spreadsheet stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Level {
    #[serde(rename = "ปฐมวัย")]
    Early,
    #[serde(rename = "ประถม")]
    Primary,
    #[serde(rename = "กรีฑา (ทั่วไป)")]
    AthleticsNoAge,
    #[serde(rename = "กรีฑา (ระบุอายุ)")]
    AthleticsAge,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Early,
        Level::Primary,
        Level::AthleticsNoAge,
        Level::AthleticsAge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Level::Early => "ปฐมวัย",
            Level::Primary => "ประถม",
            Level::AthleticsNoAge => "กรีฑา (ทั่วไป)",
            Level::AthleticsAge => "กรีฑา (ระบุอายุ)",
        }
    }

    /// Short ASCII name accepted on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Level::Early => "early",
            Level::Primary => "primary",
            Level::AthleticsNoAge => "athletics",
            Level::AthleticsAge => "athletics-age",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Level {
    type Err = String;

    /// Accepts either the Thai label or the ASCII slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.label() == s || level.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = Level::ALL.iter().map(|l| l.slug()).collect();
                format!("unknown level '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}
