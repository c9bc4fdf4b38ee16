use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        filters::{PageFilters, Selection, de_selection, replace, set_search, set_selection},
        transitions::{WithdrawalAction, withdrawal_actions},
    },
    models::{BankDetails, Pagination, WithdrawalRequest, WithdrawalStatus, de_count, de_number},
    routes::params::SortOrder,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalSortField {
    #[default]
    RequestDate,
    Amount,
    Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WithdrawalFilters {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WithdrawalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    pub sort_by: WithdrawalSortField,
    pub sort_order: SortOrder,
}

impl Default for WithdrawalFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: super::DEFAULT_PAGE_SIZE,
            status: None,
            worker_id: None,
            date_from: None,
            date_to: None,
            sort_by: WithdrawalSortField::RequestDate,
            sort_order: SortOrder::Desc,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WithdrawalFiltersUpdate {
    #[serde(default, deserialize_with = "de_selection")]
    #[schema(value_type = Option<String>)]
    pub status: Option<Selection<WithdrawalStatus>>,
    pub worker_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: Option<WithdrawalSortField>,
    pub sort_order: Option<SortOrder>,
}

impl PageFilters for WithdrawalFilters {
    type Update = WithdrawalFiltersUpdate;

    fn page(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    fn merge(&mut self, update: WithdrawalFiltersUpdate) -> bool {
        let sort_by = match update.sort_by {
            Some(next) => replace(&mut self.sort_by, next),
            None => false,
        };
        let sort_order = match update.sort_order {
            Some(next) => replace(&mut self.sort_order, next),
            None => false,
        };
        let changes = [
            set_selection(&mut self.status, update.status),
            set_search(&mut self.worker_id, update.worker_id),
            set_search(&mut self.date_from, update.date_from),
            set_search(&mut self.date_to, update.date_to),
            sort_by,
            sort_order,
        ];
        changes.contains(&true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WithdrawalSummary {
    #[serde(default, deserialize_with = "de_count")]
    pub total_requests: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub pending_requests: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub approved_requests: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub rejected_requests: u64,
    #[serde(default, deserialize_with = "de_number")]
    pub total_amount_pending: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub total_amount_approved: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalsPage {
    #[serde(default)]
    pub withdrawal_requests: Vec<WithdrawalRequest>,
    pub pagination: Pagination,
    #[serde(default)]
    pub summary: Option<WithdrawalSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateWithdrawalRequest {
    pub worker_id: String,
    pub amount: f64,
    pub bank_details: BankDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The process dialog: chosen action plus optional notes and reason.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProcessActionBody {
    pub action: WithdrawalAction,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WithdrawalRow {
    pub id: String,
    pub worker_id: String,
    pub worker_name: Option<String>,
    pub worker_email: Option<String>,
    pub amount: f64,
    pub status: WithdrawalStatus,
    pub request_date: Option<String>,
    pub bank_name: String,
    pub account_holder_name: String,
    pub account_number: String,
    pub actions: Vec<WithdrawalAction>,
}

impl From<WithdrawalRequest> for WithdrawalRow {
    fn from(req: WithdrawalRequest) -> Self {
        Self {
            account_number: req.bank_details.masked_account(),
            actions: withdrawal_actions(req.status),
            id: req.id.into(),
            worker_id: req.worker_id,
            worker_name: req.worker_name,
            worker_email: req.worker_email,
            amount: req.amount,
            status: req.status,
            request_date: req.request_date,
            bank_name: req.bank_details.bank_name,
            account_holder_name: req.bank_details.account_holder_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sort_is_newest_request_first() {
        let query = serde_json::to_value(WithdrawalFilters::default()).unwrap();
        assert_eq!(query["sort_by"], "request_date");
        assert_eq!(query["sort_order"], "desc");
        assert!(query.get("status").is_none());
    }

    #[test]
    fn rows_offer_only_table_actions() {
        let req: WithdrawalRequest = serde_json::from_value(serde_json::json!({
            "id": "W1",
            "worker_id": "wk1",
            "amount": "5000",
            "status": "approved",
            "bank_details": {
                "account_number": "0123456789",
                "bank_name": "GTB",
                "account_holder_name": "Ada Obi"
            }
        }))
        .unwrap();
        let row = WithdrawalRow::from(req);
        assert_eq!(row.actions, vec![WithdrawalAction::Reject, WithdrawalAction::Process]);
        assert_eq!(row.account_number, "****6789");
    }
}
