//! Sidebar layout of the dashboard.

use serde::Serialize;
use utoipa::ToSchema;

pub const LOGIN_ROUTE: &str = "/auth";
pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavSection {
    pub title: &'static str,
    pub items: &'static [NavItem],
}

const fn item(title: &'static str, href: &'static str) -> NavItem {
    NavItem { title, href }
}

pub static SECTIONS: &[NavSection] = &[
    NavSection {
        title: "Overview",
        items: &[item("Dashboard", HOME_ROUTE)],
    },
    NavSection {
        title: "Admin Management",
        items: &[
            item("Users", "/users"),
            item("Workers", "/workers"),
            item("Bookings", "/bookings"),
            item("Cleaning Subscriptions", "/cleaning-subscriptions"),
            item("Withdrawal Requests", "/withdrawal-requests"),
        ],
    },
    NavSection {
        title: "Services",
        items: &[
            item("Ads Banners", "/ads-banners"),
            item("House Types", "/house-types"),
        ],
    },
    NavSection {
        title: "Analytics",
        items: &[
            item("Worker Tasks", "/analytics/worker-tasks"),
            item("Monthly Tasks", "/analytics/monthly-tasks"),
            item("Periodic Tasks", "/analytics/periodic-tasks"),
        ],
    },
    NavSection {
        title: "Worker Jobs",
        items: &[
            item("Assigned Jobs", "/worker-jobs/assigned"),
            item("Current Job", "/worker-jobs/current"),
            item("Job History", "/worker-jobs/history"),
        ],
    },
];

/// The section item whose route is `path` or a parent of it.
pub fn active_item(path: &str) -> Option<&'static NavItem> {
    SECTIONS
        .iter()
        .flat_map(|section| section.items.iter())
        .filter(|item| {
            path == item.href
                || (item.href != HOME_ROUTE && path.starts_with(item.href) && path[item.href.len()..].starts_with('/'))
        })
        .max_by_key(|item| item.href.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_paths_highlight_their_parent() {
        assert_eq!(active_item("/workers/w1").map(|i| i.title), Some("Workers"));
        assert_eq!(active_item("/").map(|i| i.title), Some("Dashboard"));
        assert!(active_item("/workersx").is_none());
    }
}
