use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::filters::{PageFilters, Selection, de_selection, set_search, set_selection},
    models::{Pagination, User},
};

/// Query sent to `GET /admin/users`; also the users page filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserFilters {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, rename = "isVerified", skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

impl Default for UserFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: super::DEFAULT_PAGE_SIZE,
            search: None,
            is_verified: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserFiltersUpdate {
    pub search: Option<String>,
    /// `true`, `false` or `"all"`.
    #[serde(default, rename = "isVerified", deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub is_verified: Option<Selection<bool>>,
}

impl PageFilters for UserFilters {
    type Update = UserFiltersUpdate;

    fn page(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    fn merge(&mut self, update: UserFiltersUpdate) -> bool {
        let search = set_search(&mut self.search, update.search);
        let verified = set_selection(&mut self.is_verified, update.is_verified);
        search || verified
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub users: Vec<User>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub sex: Option<String>,
    pub verified: bool,
    pub role: Option<String>,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        let full_name = format!("{} {}", user.first_name, user.last_name)
            .trim()
            .to_string();
        Self {
            id: user.id.into(),
            full_name,
            email: user.email,
            phone_number: user.phone_number,
            sex: user.sex,
            verified: user.is_verified,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::apply_update;

    #[test]
    fn unset_filters_are_not_sent_upstream() {
        let query = serde_json::to_value(UserFilters::default()).unwrap();
        assert_eq!(query, serde_json::json!({ "page": 1, "limit": 10 }));
    }

    #[test]
    fn verification_filter_resets_page() {
        let mut filters = UserFilters {
            page: 4,
            ..UserFilters::default()
        };
        let update: UserFiltersUpdate = serde_json::from_str(r#"{"isVerified":true}"#).unwrap();
        assert!(apply_update(&mut filters, update));
        assert_eq!(filters.page, 1);
        assert_eq!(filters.is_verified, Some(true));
    }
}
