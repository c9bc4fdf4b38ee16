use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Pagination;

#[derive(Debug, Serialize, ToSchema, Clone, Default, PartialEq)]
pub struct Meta {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total: Option<u64>,
    pub total_pages: Option<u32>,
    pub has_next: Option<bool>,
    pub has_prev: Option<bool>,
}

impl Meta {
    pub fn from_pagination(pagination: &Pagination) -> Self {
        Self {
            page: Some(pagination.current_page),
            per_page: Some(pagination.limit),
            total: pagination.total,
            total_pages: Some(pagination.total_pages),
            has_next: Some(pagination.has_next_page),
            has_prev: Some(pagination.has_prev_page),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

/// One rendered list page: rows for the current filters plus the filter
/// state itself, so the caller can redraw its controls.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListView<R, F> {
    pub rows: Vec<R>,
    pub filters: F,
    pub pagination: Meta,
    /// Set when there are no rows; the text depends on whether filters are on.
    pub empty_message: Option<String>,
    /// A mutation for this page is still in flight.
    pub pending: bool,
}

impl<R, F> ListView<R, F> {
    pub fn new(rows: Vec<R>, filters: F, pagination: Meta, filtered: bool, noun: &str) -> Self {
        let empty_message = rows.is_empty().then(|| {
            if filtered {
                format!("No {noun} match the current filters")
            } else {
                format!("No {noun} found")
            }
        });
        Self {
            rows,
            filters,
            pagination,
            empty_message,
            pending: false,
        }
    }

    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }
}
