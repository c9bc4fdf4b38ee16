use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::filters::{PageFilters, Selection, de_selection, set_search, set_selection},
    models::{BookingType, Pagination, Worker, WorkerJob, de_count, de_number},
};

pub const SKILLS: [&str; 7] = [
    "plumber",
    "electrician",
    "carpenter",
    "painter",
    "mason",
    "house_keeping",
    "dry_cleaning",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkerFilters {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(default, rename = "isAvailable", skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, rename = "isVerified", skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(default, rename = "isAssigned", skip_serializing_if = "Option::is_none")]
    pub is_assigned: Option<bool>,
    #[serde(default, rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Default for WorkerFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: super::DEFAULT_PAGE_SIZE,
            search: None,
            skill: None,
            is_available: None,
            is_verified: None,
            is_assigned: None,
            is_active: None,
        }
    }
}

impl WorkerFilters {
    /// Worker picker used by the assignment dialog: first 50 matches.
    pub fn candidates(search: Option<String>, skill: Option<String>) -> Self {
        Self {
            limit: 50,
            search: search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            skill: skill.filter(|s| !s.is_empty() && s != "all"),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WorkerFiltersUpdate {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub skill: Option<Selection<String>>,
    #[serde(default, rename = "isAvailable", deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub is_available: Option<Selection<bool>>,
    #[serde(default, rename = "isVerified", deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub is_verified: Option<Selection<bool>>,
    #[serde(default, rename = "isAssigned", deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub is_assigned: Option<Selection<bool>>,
    #[serde(default, rename = "isActive", deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub is_active: Option<Selection<bool>>,
}

impl PageFilters for WorkerFilters {
    type Update = WorkerFiltersUpdate;

    fn page(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    fn merge(&mut self, update: WorkerFiltersUpdate) -> bool {
        // Evaluate every field; `||` would stop at the first change.
        let changes = [
            set_search(&mut self.search, update.search),
            set_selection(&mut self.skill, update.skill),
            set_selection(&mut self.is_available, update.is_available),
            set_selection(&mut self.is_verified, update.is_verified),
            set_selection(&mut self.is_assigned, update.is_assigned),
            set_selection(&mut self.is_active, update.is_active),
        ];
        changes.contains(&true)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkersPage {
    #[serde(default)]
    pub workers: Vec<Worker>,
    pub pagination: Pagination,
}

/// Body of `POST /worker/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateWorkerRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub skill: String,
}

impl CreateWorkerRequest {
    pub fn is_complete(&self) -> bool {
        [
            &self.full_name,
            &self.email,
            &self.phone_number,
            &self.password,
            &self.skill,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateWorkerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(default, rename = "isAvailable", skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, rename = "isVerified", skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

/// `POST /worker/signup` answers with `{ data: { worker } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedWorker {
    pub worker: Worker,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams, PartialEq)]
pub struct AssignedJobsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<BookingType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams, PartialEq)]
pub struct JobHistoryQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<BookingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AssignedJobsSummary {
    #[serde(default, deserialize_with = "de_count")]
    pub total_jobs: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub pending_jobs: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub active_jobs: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub completed_jobs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignedJobs {
    #[serde(default)]
    pub assigned_jobs: Vec<WorkerJob>,
    #[serde(default)]
    pub summary: AssignedJobsSummary,
    #[serde(default)]
    pub pagination: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentJob {
    #[serde(default)]
    pub current_job: Option<WorkerJob>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct JobHistorySummary {
    #[serde(default, deserialize_with = "de_count")]
    pub total_jobs: u64,
    #[serde(default, deserialize_with = "de_number")]
    pub total_earnings: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobHistory {
    #[serde(default)]
    pub job_history: Vec<WorkerJob>,
    #[serde(default)]
    pub summary: JobHistorySummary,
    #[serde(default)]
    pub pagination: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkerRow {
    pub id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub skill: String,
    pub status: &'static str,
    pub verified: bool,
    pub rating: f64,
    pub total_jobs: u64,
    pub completed_jobs: u64,
}

/// Availability label shown next to a worker.
pub fn status_label(worker: &Worker) -> &'static str {
    if !worker.is_active {
        "Offline"
    } else if worker.is_assigned {
        "Busy"
    } else if worker.is_available {
        "Available"
    } else {
        "Unavailable"
    }
}

impl From<Worker> for WorkerRow {
    fn from(worker: Worker) -> Self {
        let status = status_label(&worker);
        Self {
            id: worker.id.into(),
            full_name: worker.full_name,
            email: worker.email,
            phone_number: worker.phone_number,
            skill: worker.skill,
            status,
            verified: worker.is_verified,
            rating: worker.rating,
            total_jobs: worker.total_jobs,
            completed_jobs: worker.completed_jobs,
        }
    }
}

/// A row in the worker picker. Unavailable workers stay selectable.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkerCandidate {
    pub id: String,
    pub full_name: String,
    pub skill: String,
    pub available: bool,
    pub status: &'static str,
}

impl From<Worker> for WorkerCandidate {
    fn from(worker: Worker) -> Self {
        let status = status_label(&worker);
        Self {
            available: worker.is_active && worker.is_available && !worker.is_assigned,
            id: worker.id.into(),
            full_name: worker.full_name,
            skill: worker.skill,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(active: bool, assigned: bool, available: bool) -> Worker {
        serde_json::from_value(serde_json::json!({
            "_id": "w1",
            "full_name": "Ada Obi",
            "skill": "plumber",
            "isActive": active,
            "isAssigned": assigned,
            "isAvailable": available,
        }))
        .unwrap()
    }

    #[test]
    fn status_label_prefers_offline_then_busy() {
        assert_eq!(status_label(&worker(false, true, true)), "Offline");
        assert_eq!(status_label(&worker(true, true, true)), "Busy");
        assert_eq!(status_label(&worker(true, false, true)), "Available");
        assert_eq!(status_label(&worker(true, false, false)), "Unavailable");
    }

    #[test]
    fn candidate_query_drops_the_all_skill() {
        let filters = WorkerFilters::candidates(Some("  ".into()), Some("all".into()));
        assert_eq!(filters.limit, 50);
        assert_eq!(filters.page, 1);
        assert_eq!(filters.search, None);
        assert_eq!(filters.skill, None);
    }

    #[test]
    fn merge_reports_a_change_from_any_field() {
        let mut filters = WorkerFilters::default();
        let update: WorkerFiltersUpdate =
            serde_json::from_str(r#"{"skill":"all","isActive":false}"#).unwrap();
        assert!(filters.merge(update));
        assert_eq!(filters.skill, None);
        assert_eq!(filters.is_active, Some(false));
    }
}
