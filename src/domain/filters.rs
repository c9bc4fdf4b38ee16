//! Filter and pagination state for list pages.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};

/// A filter choice from a select box: `"all"` (or null) clears the filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Selection<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Selection<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::Null => Ok(Selection::All),
            serde_json::Value::String(s) if s == "all" => Ok(Selection::All),
            _ => T::deserialize(value)
                .map(Selection::Only)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// For `Option<Selection<T>>` update fields: an absent field leaves the
/// filter alone, while an explicit `null` clears it like `"all"`.
pub fn de_selection<'de, D, T>(deserializer: D) -> Result<Option<Selection<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Selection::deserialize(deserializer).map(Some)
}

/// Free-text search box: an empty string clears it.
pub fn set_search(slot: &mut Option<String>, update: Option<String>) -> bool {
    let Some(raw) = update else {
        return false;
    };
    let next = Some(raw.trim().to_string()).filter(|s| !s.is_empty());
    replace(slot, next)
}

pub fn set_selection<T: PartialEq>(slot: &mut Option<T>, update: Option<Selection<T>>) -> bool {
    match update {
        Some(selection) => replace(slot, selection.into_option()),
        None => false,
    }
}

pub fn replace<T: PartialEq>(slot: &mut T, next: T) -> bool {
    if *slot == next {
        return false;
    }
    *slot = next;
    true
}

pub trait PageFilters {
    type Update;

    fn page(&self) -> u32;

    fn set_page(&mut self, page: u32);

    /// Merge `update` into the filters and report whether any filter value
    /// actually changed. Pagination is handled by [`apply_update`].
    fn merge(&mut self, update: Self::Update) -> bool;
}

/// Apply a filter change; any changed filter sends the page back to 1.
pub fn apply_update<F: PageFilters>(filters: &mut F, update: F::Update) -> bool {
    let changed = filters.merge(update);
    if changed {
        filters.set_page(1);
    }
    changed
}

pub fn go_to_page<F: PageFilters>(filters: &mut F, page: u32) {
    filters.set_page(page.max(1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_null_clear_the_selection() {
        let all: Selection<bool> = serde_json::from_str("\"all\"").unwrap();
        let null: Selection<bool> = serde_json::from_str("null").unwrap();
        let only: Selection<bool> = serde_json::from_str("true").unwrap();
        assert_eq!(all, Selection::All);
        assert_eq!(null, Selection::All);
        assert_eq!(only, Selection::Only(true));
    }

    #[test]
    fn blank_search_clears_and_same_value_is_no_change() {
        let mut search = Some("ada".to_string());
        assert!(!set_search(&mut search, Some("ada".into())));
        assert!(set_search(&mut search, Some("  ".into())));
        assert_eq!(search, None);
    }
}
