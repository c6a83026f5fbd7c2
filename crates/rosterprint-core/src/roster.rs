//! Searching, filtering and sorting the athlete table.

use std::fmt;
use std::str::FromStr;

use crate::models::{or_unspecified, Athlete};
use crate::utils::{cmp_ignore_case, contains_ignore_case};

// Sorting options for the athlete table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Sport,
    School,
}

impl SortColumn {
    fn value<'a>(&self, athlete: &'a Athlete) -> &'a str {
        match self {
            SortColumn::Name => &athlete.name,
            SortColumn::Sport => &athlete.sport_type,
            SortColumn::School => &athlete.school,
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortColumn::Name => write!(f, "name"),
            SortColumn::Sport => write!(f, "sport"),
            SortColumn::School => write!(f, "school"),
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortColumn::Name),
            "sport" | "sporttype" => Ok(SortColumn::Sport),
            "school" => Ok(SortColumn::School),
            other => Err(format!("unknown sort column '{}' (expected name, sport or school)", other)),
        }
    }
}

/// Filters applied to the table. `None` means "all".
///
/// Sport, age and gender compare against the athlete's group key, so a blank
/// filter value or the "unspecified" label selects athletes with that field
/// left empty, the same way they are grouped for printing.
#[derive(Debug, Clone, Default)]
pub struct RosterFilter {
    /// Matched case-insensitively against name and school.
    pub search: Option<String>,
    pub level: Option<String>,
    pub sport: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
}

impl RosterFilter {
    pub fn matches(&self, athlete: &Athlete) -> bool {
        fn field_matches(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().map_or(true, |f| f.trim() == value.trim())
        }
        fn group_field_matches(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().map_or(true, |f| or_unspecified(f) == value)
        }

        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let query = query.to_lowercase();
                contains_ignore_case(&athlete.name, &query)
                    || contains_ignore_case(&athlete.school, &query)
            }
            _ => true,
        };

        if !search_ok || !field_matches(&self.level, &athlete.level) {
            return false;
        }
        let key = athlete.group_key();
        group_field_matches(&self.sport, &key.sport)
            && group_field_matches(&self.age, &key.age)
            && group_field_matches(&self.gender, &key.gender)
    }
}

/// Apply `filter`, then sort by `sort` if given. Without a sort column the
/// input order is kept.
pub fn filter_and_sort<'a>(
    athletes: &'a [Athlete],
    filter: &RosterFilter,
    sort: Option<SortColumn>,
    ascending: bool,
) -> Vec<&'a Athlete> {
    let mut rows: Vec<&Athlete> = athletes.iter().filter(|a| filter.matches(a)).collect();

    if let Some(column) = sort {
        rows.sort_by(|a, b| {
            let cmp = cmp_ignore_case(column.value(a), column.value(b));
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });
    }

    rows
}

/// Distinct sport names as they group, in order of first appearance.
pub fn unique_sports(athletes: &[Athlete]) -> Vec<String> {
    let mut sports: Vec<String> = Vec::new();
    for athlete in athletes {
        let sport = or_unspecified(&athlete.sport_type);
        if !sports.contains(&sport) {
            sports.push(sport);
        }
    }
    sports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::categories;
    use crate::models::UNSPECIFIED;

    fn athlete(id: &str, name: &str, sport: &str, school: &str, level: &str) -> Athlete {
        Athlete {
            id: id.to_string(),
            name: name.to_string(),
            sport_type: sport.to_string(),
            school: school.to_string(),
            level: level.to_string(),
            ..Default::default()
        }
    }

    fn roster() -> Vec<Athlete> {
        vec![
            athlete("1", "Charlie Brown", "ฟุตซอล", "North School", "ประถม"),
            athlete("2", "alice Smith", "ตะกร้อ", "South School", "ประถม"),
            athlete("3", "Bob Jones", "ฟุตซอล", "north annex", "ปฐมวัย"),
        ]
    }

    fn ids(rows: &[&Athlete]) -> Vec<String> {
        rows.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_no_filter_keeps_order() {
        let athletes = roster();
        let rows = filter_and_sort(&athletes, &RosterFilter::default(), None, true);
        assert_eq!(ids(&rows), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_search_matches_name_or_school() {
        let athletes = roster();
        let filter = RosterFilter {
            search: Some("NORTH".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&athletes, &filter, None, true)), vec!["1", "3"]);

        let filter = RosterFilter {
            search: Some("smith".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&athletes, &filter, None, true)), vec!["2"]);
    }

    #[test]
    fn test_level_and_sport_filters() {
        let athletes = roster();
        let filter = RosterFilter {
            level: Some("ประถม".to_string()),
            sport: Some("ฟุตซอล".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&athletes, &filter, None, true)), vec!["1"]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let athletes = roster();
        let filter = RosterFilter::default();
        let asc = filter_and_sort(&athletes, &filter, Some(SortColumn::Name), true);
        assert_eq!(ids(&asc), vec!["2", "3", "1"]);
        let desc = filter_and_sort(&athletes, &filter, Some(SortColumn::Name), false);
        assert_eq!(ids(&desc), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_sort_by_school_is_stable() {
        let athletes = vec![
            athlete("1", "x", "", "Same", ""),
            athlete("2", "y", "", "same", ""),
            athlete("3", "z", "", "Alpha", ""),
        ];
        let rows = filter_and_sort(&athletes, &RosterFilter::default(), Some(SortColumn::School), true);
        assert_eq!(ids(&rows), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_unique_sports() {
        let mut athletes = roster();
        assert_eq!(unique_sports(&athletes), vec!["ฟุตซอล", "ตะกร้อ"]);

        athletes.push(athlete("4", "Dan", "  ", "", ""));
        assert_eq!(unique_sports(&athletes), vec!["ฟุตซอล", "ตะกร้อ", UNSPECIFIED]);
    }

    #[test]
    fn test_unspecified_label_selects_blank_fields() {
        let athletes = vec![Athlete {
            id: "1".to_string(),
            sport_type: "ฟุตซอล".to_string(),
            age: String::new(),
            gender: "ชาย".to_string(),
            ..Default::default()
        }];
        let filter = RosterFilter {
            sport: Some("ฟุตซอล".to_string()),
            age: Some(UNSPECIFIED.to_string()),
            gender: Some(" ชาย ".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&athletes, &filter, None, true)), vec!["1"]);

        let filter = RosterFilter {
            age: Some("12".to_string()),
            ..Default::default()
        };
        assert!(filter_and_sort(&athletes, &filter, None, true).is_empty());
    }

    #[test]
    fn test_every_category_is_selectable() {
        let mut athletes = roster();
        athletes[0].age = "12".to_string();
        athletes[0].gender = "ชาย".to_string();
        athletes[1].age = "10".to_string();
        athletes.push(Athlete {
            id: "4".to_string(),
            gender: "หญิง".to_string(),
            ..Default::default()
        });

        for cat in categories(&athletes) {
            let filter = RosterFilter {
                sport: Some(cat.key.sport.clone()),
                age: Some(cat.key.age.clone()),
                gender: Some(cat.key.gender.clone()),
                ..Default::default()
            };
            let selected = filter_and_sort(&athletes, &filter, None, true);
            assert_eq!(selected.len(), cat.count, "category {}", cat.key);
            assert!(selected.iter().all(|a| a.group_key() == cat.key));
        }
    }

    #[test]
    fn test_sort_column_from_str() {
        assert_eq!("Sport".parse::<SortColumn>(), Ok(SortColumn::Sport));
        assert!("age".parse::<SortColumn>().is_err());
    }
}
