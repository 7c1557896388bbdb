//! Listing filter state and its reducer.
//!
//! A `FilterState` is an immutable value. User interactions are expressed as
//! `FilterAction`s and folded into a new state by [`reduce`]; nothing here
//! performs side effects.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::Serialize;

use super::{categories::Category, error::DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "date-desc")]
    DateDesc,
    #[serde(rename = "date-asc")]
    DateAsc,
    #[serde(rename = "title-az")]
    TitleAz,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
            SortOrder::TitleAz => "title-az",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "date-desc" => Ok(SortOrder::DateDesc),
            "date-asc" => Ok(SortOrder::DateAsc),
            "title-az" => Ok(SortOrder::TitleAz),
            other => Err(DomainError::unknown_sort_order(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterState {
    pub category: Category,
    /// Active tags, kept sorted and distinct.
    pub tags: BTreeSet<String>,
    pub query: String,
    pub sort: SortOrder,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Switch category tab. Clears the active tags.
    SelectCategory(Category),
    /// Add the tag when inactive, remove it when active.
    ToggleTag(String),
    RemoveTag(String),
    ClearTags,
    SetQuery(String),
    SetSort(SortOrder),
}

pub fn reduce(state: &FilterState, action: FilterAction) -> FilterState {
    let mut next = state.clone();
    match action {
        FilterAction::SelectCategory(category) => {
            next.category = category;
            next.tags.clear();
        }
        FilterAction::ToggleTag(tag) => {
            if is_listable_tag(&tag) && !next.tags.remove(&tag) {
                next.tags.insert(tag);
            }
        }
        FilterAction::RemoveTag(tag) => {
            next.tags.remove(&tag);
        }
        FilterAction::ClearTags => next.tags.clear(),
        FilterAction::SetQuery(query) => next.query = query,
        FilterAction::SetSort(sort) => next.sort = sort,
    }
    next
}

// Active tags travel as one comma-joined query value, so an empty tag or one
// containing a comma could not be read back.
fn is_listable_tag(tag: &str) -> bool {
    !tag.is_empty() && !tag.contains(',')
}
