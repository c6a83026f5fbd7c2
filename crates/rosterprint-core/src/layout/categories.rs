use crate::models::{Athlete, GroupKey};

use super::paginate::group_athletes;

/// One entry of the print menu: a group and how many athletes it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: GroupKey,
    pub count: usize,
}

/// Summarize athletes per group, in print order.
pub fn categories(athletes: &[Athlete]) -> Vec<Category> {
    group_athletes(athletes)
        .into_iter()
        .map(|(key, members)| Category {
            key,
            count: members.len(),
        })
        .collect()
}
