use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::filters::{PageFilters, set_search},
    models::{Pagination, de_count, de_number},
};

// Month labels come back as "Jan", "2025-01" or 1 depending on the report.
fn de_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkerTaskFilters {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl Default for WorkerTaskFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: super::DEFAULT_PAGE_SIZE,
            worker_id: None,
            date_from: None,
            date_to: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WorkerTaskFiltersUpdate {
    pub worker_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl PageFilters for WorkerTaskFilters {
    type Update = WorkerTaskFiltersUpdate;

    fn page(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    fn merge(&mut self, update: WorkerTaskFiltersUpdate) -> bool {
        let changes = [
            set_search(&mut self.worker_id, update.worker_id),
            set_search(&mut self.date_from, update.date_from),
            set_search(&mut self.date_to, update.date_to),
        ];
        changes.contains(&true)
    }
}

/// Worker reference on a stats line: `worker_id`, else `id`, else `_id`.
/// Profile-shaped rows may carry several of them at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct WorkerKey {
    pub worker_id: String,
}

impl<'de> Deserialize<'de> for WorkerKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            worker_id: Option<String>,
            #[serde(default)]
            id: Option<String>,
            #[serde(default, rename = "_id")]
            mongo_id: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let worker_id = [raw.worker_id, raw.id, raw.mongo_id]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
            .unwrap_or_default();
        Ok(Self { worker_id })
    }
}

impl From<&str> for WorkerKey {
    fn from(id: &str) -> Self {
        Self {
            worker_id: id.to_string(),
        }
    }
}

/// One worker's performance line. Older API builds answer with the worker
/// profile field names, hence the aliases.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkerTaskStat {
    #[serde(flatten)]
    pub worker: WorkerKey,
    #[serde(default, alias = "full_name")]
    pub worker_name: String,
    #[serde(default, alias = "totalJobs", deserialize_with = "de_count")]
    pub total_tasks: u64,
    #[serde(default, alias = "completedJobs", deserialize_with = "de_count")]
    pub completed_tasks: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub pending_tasks: u64,
    #[serde(default, alias = "lifetimeEarnings", deserialize_with = "de_number")]
    pub total_earnings: f64,
    #[serde(default, alias = "averageRating", deserialize_with = "de_number")]
    pub average_rating: f64,
    #[serde(default, alias = "completionRate", deserialize_with = "de_number")]
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkerTasksReport {
    #[serde(default, alias = "workers")]
    pub stats: Vec<WorkerTaskStat>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkerTaskTotals {
    pub total_workers: usize,
    pub total_tasks: u64,
    pub total_earnings: f64,
    /// Mean of the listed workers' ratings, one decimal.
    pub average_rating: f64,
}

impl WorkerTaskTotals {
    pub fn from_stats(stats: &[WorkerTaskStat]) -> Self {
        let average_rating = if stats.is_empty() {
            0.0
        } else {
            let sum: f64 = stats.iter().map(|s| s.average_rating).sum();
            (sum / stats.len() as f64 * 10.0).round() / 10.0
        };
        Self {
            total_workers: stats.len(),
            total_tasks: stats.iter().map(|s| s.total_tasks).sum(),
            total_earnings: stats.iter().map(|s| s.total_earnings).sum(),
            average_rating,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkerTaskRow {
    #[serde(flatten)]
    pub stat: WorkerTaskStat,
    /// `high` (>= 90), `medium` (>= 70) or `low`.
    pub completion_band: &'static str,
}

impl From<WorkerTaskStat> for WorkerTaskRow {
    fn from(stat: WorkerTaskStat) -> Self {
        let completion_band = match stat.completion_rate {
            r if r >= 90.0 => "high",
            r if r >= 70.0 => "medium",
            _ => "low",
        };
        Self {
            stat,
            completion_band,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct MonthlyTasksParams {
    pub year: Option<i32>,
    pub months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyTasksQuery {
    pub year: i32,
    pub months: u32,
}

impl MonthlyTasksQuery {
    /// Missing values default to the current year and twelve months.
    pub fn resolve(params: MonthlyTasksParams, today: NaiveDate) -> Self {
        Self {
            year: params.year.unwrap_or_else(|| today.year()),
            months: params.months.unwrap_or(12),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MonthlyStatistics {
    #[serde(default, rename = "totalTasks", deserialize_with = "de_count")]
    pub total_tasks: u64,
    #[serde(default, rename = "completedTasks", deserialize_with = "de_count")]
    pub completed_tasks: u64,
    #[serde(default, rename = "pendingTasks", deserialize_with = "de_count")]
    pub pending_tasks: u64,
    #[serde(default, rename = "cancelledTasks", deserialize_with = "de_count")]
    pub cancelled_tasks: u64,
    #[serde(default, rename = "totalRevenue", deserialize_with = "de_number")]
    pub total_revenue: f64,
    #[serde(default, rename = "averageTaskValue", deserialize_with = "de_number")]
    pub average_task_value: f64,
    #[serde(default, rename = "completionRate", deserialize_with = "de_number")]
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyTaskStats {
    #[serde(default, deserialize_with = "de_label")]
    pub month: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "de_count")]
    pub tasks: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub completed: u64,
    #[serde(default, deserialize_with = "de_number")]
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ServiceBreakdown {
    #[serde(default, rename = "totalTasks", deserialize_with = "de_count")]
    pub total_tasks: u64,
    #[serde(default, rename = "completedTasks", deserialize_with = "de_count")]
    pub completed_tasks: u64,
    #[serde(default, rename = "completionRate", deserialize_with = "de_number")]
    pub completion_rate: f64,
    #[serde(default, rename = "totalRevenue", deserialize_with = "de_number")]
    pub total_revenue: f64,
    #[serde(default, rename = "averageTaskValue", deserialize_with = "de_number")]
    pub average_task_value: f64,
}

/// `GET /admin/analytics/monthly-tasks` answers without an envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyTasksReport {
    pub year: i32,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub statistics: MonthlyStatistics,
    #[serde(default, rename = "monthlyBreakdown")]
    pub monthly_breakdown: Vec<MonthlyTaskStats>,
    #[serde(default, rename = "serviceBreakdown")]
    pub service_breakdown: BTreeMap<String, ServiceBreakdown>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct PeriodicTasksQuery {
    #[serde(default)]
    pub period: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl PeriodicTasksQuery {
    /// `task_type=all` means every service.
    pub fn normalized(mut self) -> Self {
        self.task_type = self.task_type.filter(|t| !t.is_empty() && t != "all");
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PeriodicTaskStats {
    #[serde(default, deserialize_with = "de_label")]
    pub period: String,
    #[serde(default)]
    pub task_type: String,
    #[serde(default, deserialize_with = "de_number")]
    pub frequency: f64,
    #[serde(default, deserialize_with = "de_count")]
    pub total_bookings: u64,
    #[serde(default, deserialize_with = "de_number")]
    pub completion_rate: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub customer_satisfaction: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PeriodicSummary {
    #[serde(default)]
    pub most_popular_service: Option<String>,
    #[serde(default)]
    pub highest_satisfaction: Option<String>,
    #[serde(default)]
    pub best_completion_rate: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PeriodicTasksReport {
    #[serde(default)]
    pub stats: Vec<PeriodicTaskStats>,
    #[serde(default)]
    pub summary: PeriodicSummary,
}

pub fn worker_tasks_filename(today: NaiveDate) -> String {
    format!("worker-tasks-analytics-{}.csv", today.format("%Y-%m-%d"))
}

pub fn monthly_tasks_filename(year: i32) -> String {
    format!("monthly-tasks-analytics-{year}.csv")
}

pub fn periodic_tasks_filename(period: Period) -> String {
    format!("periodic-tasks-analytics-{}.csv", period.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_stats_accept_profile_field_names() {
        let report: WorkerTasksReport = serde_json::from_value(serde_json::json!({
            "workers": [{
                "_id": "w1",
                "full_name": "Ada Obi",
                "totalJobs": 10,
                "completedJobs": 9,
                "lifetimeEarnings": "42000",
                "averageRating": 4.5,
                "completionRate": 90
            }]
        }))
        .unwrap();
        let stat = &report.stats[0];
        assert_eq!(stat.worker.worker_id, "w1");
        assert_eq!(stat.worker_name, "Ada Obi");
        assert_eq!(stat.total_tasks, 10);
        assert_eq!(stat.total_earnings, 42000.0);
    }

    #[test]
    fn stats_line_with_every_id_field_prefers_worker_id() {
        let stat: WorkerTaskStat = serde_json::from_value(serde_json::json!({
            "worker_id": "w1",
            "id": "p1",
            "_id": "p1",
            "worker_name": "Ada Obi"
        }))
        .unwrap();
        assert_eq!(stat.worker.worker_id, "w1");
        assert_eq!(serde_json::to_value(&stat).unwrap()["worker_id"], "w1");
    }

    #[test]
    fn totals_average_ratings_to_one_decimal() {
        let stat = |rating: f64| WorkerTaskStat {
            worker: "w".into(),
            worker_name: String::new(),
            total_tasks: 2,
            completed_tasks: 1,
            pending_tasks: 1,
            total_earnings: 100.0,
            average_rating: rating,
            completion_rate: 50.0,
        };
        let totals = WorkerTaskTotals::from_stats(&[stat(4.0), stat(4.5), stat(5.0)]);
        assert_eq!(totals.total_tasks, 6);
        assert_eq!(totals.average_rating, 4.5);
        assert_eq!(WorkerTaskTotals::from_stats(&[]).average_rating, 0.0);
    }

    #[test]
    fn export_filenames() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(worker_tasks_filename(day), "worker-tasks-analytics-2025-03-03.csv");
        assert_eq!(monthly_tasks_filename(2024), "monthly-tasks-analytics-2024.csv");
        assert_eq!(periodic_tasks_filename(Period::Weekly), "periodic-tasks-analytics-weekly.csv");
    }
}
