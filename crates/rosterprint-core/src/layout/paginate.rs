//! Grouping and pagination of athletes into fixed-size print pages.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use thiserror::Error;

use crate::models::{Athlete, GroupKey};

use super::collate::{collation_key, CollationKey};

/// Photos per sheet in the photo board (5 columns x 3 rows).
pub const PHOTO_GRID_CAPACITY: usize = 15;

/// Columns in the photo board grid.
pub const PHOTO_GRID_COLUMNS: usize = 5;

/// Rows per sheet in the name list.
pub const NAME_LIST_CAPACITY: usize = 25;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Page capacity must be at least 1")]
    ZeroCapacity,
}

/// Number of slots on every page; never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCapacity(NonZeroUsize);

const fn non_zero(slots: usize) -> NonZeroUsize {
    match NonZeroUsize::new(slots) {
        Some(n) => n,
        None => panic!("page capacity constant is zero"),
    }
}

impl PageCapacity {
    pub const PHOTO_GRID: PageCapacity = PageCapacity(non_zero(PHOTO_GRID_CAPACITY));
    pub const NAME_LIST: PageCapacity = PageCapacity(non_zero(NAME_LIST_CAPACITY));

    pub fn new(slots: usize) -> Result<Self, LayoutError> {
        NonZeroUsize::new(slots)
            .map(Self)
            .ok_or(LayoutError::ZeroCapacity)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// Which printed sheet to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Photo board with name and birth date under each picture.
    #[default]
    PhotoGrid,
    /// Numbered table of names and birth dates.
    NameList,
}

impl LayoutMode {
    pub fn capacity(&self) -> PageCapacity {
        match self {
            LayoutMode::PhotoGrid => PageCapacity::PHOTO_GRID,
            LayoutMode::NameList => PageCapacity::NAME_LIST,
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::PhotoGrid => write!(f, "photo"),
            LayoutMode::NameList => write!(f, "list"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "photo" | "grid" | "photo-grid" => Ok(LayoutMode::PhotoGrid),
            "list" | "name-list" => Ok(LayoutMode::NameList),
            other => Err(format!("unknown layout '{}' (expected photo or list)", other)),
        }
    }
}

/// One printed sheet. `slots` always has exactly `capacity` entries; the
/// trailing `None`s are blank cells on the last page of a group.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    /// Zero-based position of this page within its group.
    pub index: usize,
    /// Number of pages in the group.
    pub page_count: usize,
    pub slots: Vec<Option<&'a Athlete>>,
}

impl<'a> Page<'a> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Athletes on this page, in print order.
    pub fn athletes(&self) -> impl Iterator<Item = &'a Athlete> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.page_count
    }

    /// One-based row number of `slot` counted across the whole group.
    pub fn row_number(&self, slot: usize) -> usize {
        self.index * self.capacity() + slot + 1
    }
}

/// All pages for one sport / age / gender group.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintGroup<'a> {
    pub key: GroupKey,
    pub pages: Vec<Page<'a>>,
}

impl PrintGroup<'_> {
    pub fn athlete_count(&self) -> usize {
        self.pages.iter().map(Page::filled).sum()
    }
}

/// Partition athletes by group key.
///
/// Groups come back ordered by collation of `sport|age|gender`; athletes in
/// each group are ordered by collation of their name. Both sorts are stable,
/// so equal names keep their input order and groups whose keys collate equal
/// keep first-seen order. Groups are never empty.
pub fn group_athletes(athletes: &[Athlete]) -> Vec<(GroupKey, Vec<&Athlete>)> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<&Athlete>)> = Vec::new();

    for athlete in athletes {
        let key = athlete.group_key();
        match index.get(&key) {
            Some(&i) => groups[i].1.push(athlete),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![athlete]));
            }
        }
    }

    let mut keyed: Vec<(CollationKey, (GroupKey, Vec<&Athlete>))> = groups
        .into_iter()
        .map(|(key, members)| (collation_key(&key.composite()), (key, sort_by_name(members))))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    keyed.into_iter().map(|(_, group)| group).collect()
}

fn sort_by_name(members: Vec<&Athlete>) -> Vec<&Athlete> {
    let mut keyed: Vec<(CollationKey, &Athlete)> = members
        .into_iter()
        .map(|athlete| (collation_key(&athlete.name), athlete))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, athlete)| athlete).collect()
}

/// Split already-ordered athletes into pages of exactly `capacity` slots,
/// padding the last page with blanks. No athletes means no pages.
pub fn paginate<'a>(athletes: &[&'a Athlete], capacity: PageCapacity) -> Vec<Page<'a>> {
    let size = capacity.get();
    let page_count = athletes.len().div_ceil(size);

    athletes
        .chunks(size)
        .enumerate()
        .map(|(index, chunk)| {
            let mut slots: Vec<Option<&'a Athlete>> = chunk.iter().copied().map(Some).collect();
            slots.resize(size, None);
            Page {
                index,
                page_count,
                slots,
            }
        })
        .collect()
}

/// Group athletes and lay each group out on pages of `capacity` slots.
pub fn group_and_paginate(athletes: &[Athlete], capacity: PageCapacity) -> Vec<PrintGroup<'_>> {
    group_athletes(athletes)
        .into_iter()
        .map(|(key, members)| PrintGroup {
            pages: paginate(&members, capacity),
            key,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn athlete(id: usize, name: &str, sport: &str, age: &str, gender: &str) -> Athlete {
        Athlete {
            id: id.to_string(),
            name: name.to_string(),
            sport_type: sport.to_string(),
            age: age.to_string(),
            gender: gender.to_string(),
            ..Default::default()
        }
    }

    fn squad(count: usize, sport: &str, first_id: usize) -> Vec<Athlete> {
        (first_id..first_id + count)
            .map(|i| athlete(i, &format!("Player {:02}", i), sport, "12", "ชาย"))
            .collect()
    }

    #[test]
    fn test_page_capacity_rejects_zero() {
        assert_eq!(PageCapacity::new(0), Err(LayoutError::ZeroCapacity));
        assert_eq!(PageCapacity::new(7).map(|c| c.get()), Ok(7));
    }

    #[test]
    fn test_layout_mode_capacity() {
        assert_eq!(LayoutMode::PhotoGrid.capacity().get(), 15);
        assert_eq!(LayoutMode::NameList.capacity().get(), 25);
        assert_eq!(PageCapacity::new(PHOTO_GRID_CAPACITY), Ok(PageCapacity::PHOTO_GRID));
        assert_eq!(PageCapacity::new(NAME_LIST_CAPACITY), Ok(PageCapacity::NAME_LIST));
        assert_eq!("list".parse::<LayoutMode>(), Ok(LayoutMode::NameList));
        assert_eq!("Photo".parse::<LayoutMode>(), Ok(LayoutMode::PhotoGrid));
        assert!("poster".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        let groups = group_and_paginate(&[], LayoutMode::NameList.capacity());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_sixteen_athletes_make_two_photo_pages() {
        let athletes = squad(16, "ตะกร้อ", 0);
        let groups = group_and_paginate(&athletes, LayoutMode::PhotoGrid.capacity());

        assert_eq!(groups.len(), 1);
        let pages = &groups[0].pages;
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].filled(), 15);
        assert_eq!(pages[1].filled(), 1);
        assert_eq!(pages[1].slots.iter().filter(|s| s.is_none()).count(), 14);
        assert!(pages.iter().all(|p| p.capacity() == 15 && p.page_count == 2));
        assert!(pages[1].is_last());
        assert!(!pages[0].is_last());
    }

    #[test]
    fn test_exact_multiple_has_no_padding_page() {
        let athletes = squad(30, "ฟุตซอล", 0);
        let groups = group_and_paginate(&athletes, LayoutMode::PhotoGrid.capacity());
        let pages = &groups[0].pages;
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.filled() == 15));
    }

    #[test]
    fn test_every_athlete_placed_once() {
        let mut athletes = squad(40, "วอลเลย์บอล", 0);
        athletes.extend(squad(7, "เปตอง ทีม", 40));
        athletes.push(athlete(99, "ไม่มีกีฬา", "", "", ""));

        for capacity in [1, 4, 15, 25] {
            let groups = group_and_paginate(&athletes, PageCapacity::new(capacity).unwrap());
            let mut ids: Vec<&str> = groups
                .iter()
                .flat_map(|g| g.pages.iter())
                .flat_map(|p| p.athletes())
                .map(|a| a.id.as_str())
                .collect();
            assert_eq!(ids.len(), athletes.len());
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), athletes.len());

            for group in &groups {
                let count = group.athlete_count();
                let last = group.pages.last().unwrap();
                let expected_last = if count % capacity == 0 { capacity } else { count % capacity };
                assert_eq!(last.filled(), expected_last);
                for page in &group.pages {
                    assert_eq!(page.capacity(), capacity);
                    assert!(page.athletes().all(|a| a.group_key() == group.key));
                    if !page.is_last() {
                        assert_eq!(page.filled(), capacity);
                    }
                }
            }
        }
    }

    #[test]
    fn test_missing_fields_grouped_under_sentinel() {
        let athletes = vec![
            athlete(1, "ก", "", "", ""),
            athlete(2, "ข", " ", "", "  "),
        ];
        let groups = group_athletes(&athletes);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0.composite(), "ไม่ระบุ|ไม่ระบุ|ไม่ระบุ");
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_groups_sorted_by_collated_key() {
        let athletes = vec![
            athlete(1, "a", "ฟุตซอล", "12", "ชาย"),
            athlete(2, "b", "เปตอง ทีม", "12", "หญิง"),
            athlete(3, "c", "ตะกร้อ", "12", "หญิง"),
            athlete(4, "d", "ตะกร้อ", "12", "ชาย"),
            athlete(5, "e", "ตะกร้อ", "10", "ชาย"),
        ];
        let keys: Vec<String> = group_athletes(&athletes)
            .into_iter()
            .map(|(key, _)| key.composite())
            .collect();
        // เปตอง sorts under ป, between ต and ฟ
        assert_eq!(
            keys,
            vec![
                "ตะกร้อ|10|ชาย",
                "ตะกร้อ|12|ชาย",
                "ตะกร้อ|12|หญิง",
                "เปตอง ทีม|12|หญิง",
                "ฟุตซอล|12|ชาย",
            ]
        );
    }

    #[test]
    fn test_names_sorted_and_ties_stable() {
        let athletes = vec![
            athlete(1, "สมศรี มีสุข", "หมากรุก", "12", "หญิง"),
            athlete(2, "กมลา ดีใจ", "หมากรุก", "12", "หญิง"),
            athlete(3, "สมศรี มีสุข", "หมากรุก", "12", "หญิง"),
            athlete(4, "เกศินี ทองดี", "หมากรุก", "12", "หญิง"),
        ];
        let groups = group_athletes(&athletes);
        let ids: Vec<&str> = groups[0].1.iter().map(|a| a.id.as_str()).collect();
        // เกศินี collates as ก-เ, after กมลา; duplicate names keep input order
        assert_eq!(ids, vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_row_numbers_continue_across_pages() {
        let athletes = squad(30, "ชักเยอ", 0);
        let groups = group_and_paginate(&athletes, LayoutMode::NameList.capacity());
        let pages = &groups[0].pages;
        assert_eq!(pages[0].row_number(0), 1);
        assert_eq!(pages[1].row_number(0), 26);
        assert_eq!(pages[1].row_number(4), 30);
    }
}
