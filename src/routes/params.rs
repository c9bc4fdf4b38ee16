use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::filters::PageFilters;

/// `?page=N` on a list page: move within the current filters.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct PageQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Whether anything beyond pagination differs from the page's defaults.
pub fn is_filtered<F>(filters: &F) -> bool
where
    F: PageFilters + Clone + Default + PartialEq,
{
    let mut unpaged = filters.clone();
    unpaged.set_page(1);
    unpaged != F::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::users::UserFilters;

    #[test]
    fn page_alone_is_not_a_filter() {
        let mut filters = UserFilters::default();
        filters.page = 5;
        assert!(!is_filtered(&filters));
        filters.search = Some("ada".into());
        assert!(is_filtered(&filters));
    }
}
