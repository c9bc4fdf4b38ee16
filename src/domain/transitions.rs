//! Status pipelines for withdrawal requests and cleaning subscriptions.
//!
//! The server stays authoritative; these tables decide which actions a row
//! offers and reject impossible requests before they are sent.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{SubscriptionStatus, WithdrawalStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Cannot {action} when status is {from}")]
    InvalidTransition { from: &'static str, action: &'static str },

    #[error("Rejection reason is required")]
    ReasonRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalAction {
    Approve,
    Reject,
    Process,
}

impl WithdrawalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalAction::Approve => "approve",
            WithdrawalAction::Reject => "reject",
            WithdrawalAction::Process => "process",
        }
    }
}

pub struct WithdrawalTransition {
    pub from: WithdrawalStatus,
    pub action: WithdrawalAction,
    pub to: WithdrawalStatus,
    pub requires_reason: bool,
}

pub static WITHDRAWAL_TRANSITIONS: &[WithdrawalTransition] = &[
    WithdrawalTransition {
        from: WithdrawalStatus::Pending,
        action: WithdrawalAction::Approve,
        to: WithdrawalStatus::Approved,
        requires_reason: false,
    },
    WithdrawalTransition {
        from: WithdrawalStatus::Pending,
        action: WithdrawalAction::Reject,
        to: WithdrawalStatus::Rejected,
        requires_reason: true,
    },
    WithdrawalTransition {
        from: WithdrawalStatus::Approved,
        action: WithdrawalAction::Reject,
        to: WithdrawalStatus::Rejected,
        requires_reason: true,
    },
    WithdrawalTransition {
        from: WithdrawalStatus::Approved,
        action: WithdrawalAction::Process,
        to: WithdrawalStatus::Processed,
        requires_reason: false,
    },
];

fn withdrawal_transition(
    from: WithdrawalStatus,
    action: WithdrawalAction,
) -> Option<&'static WithdrawalTransition> {
    WITHDRAWAL_TRANSITIONS
        .iter()
        .find(|t| t.from == from && t.action == action)
}

pub fn withdrawal_actions(status: WithdrawalStatus) -> Vec<WithdrawalAction> {
    WITHDRAWAL_TRANSITIONS
        .iter()
        .filter(|t| t.from == status)
        .map(|t| t.action)
        .collect()
}

/// Whether the submit button for `action` is enabled.
pub fn can_submit(status: WithdrawalStatus, action: WithdrawalAction, rejection_reason: Option<&str>) -> bool {
    match withdrawal_transition(status, action) {
        Some(t) if t.requires_reason => !is_blank(rejection_reason),
        Some(_) => true,
        None => false,
    }
}

/// Body of `PATCH /admin/withdrawal-requests/{id}/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProcessWithdrawalRequest {
    pub status: WithdrawalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

pub fn plan_withdrawal(
    current: WithdrawalStatus,
    action: WithdrawalAction,
    notes: Option<&str>,
    rejection_reason: Option<&str>,
) -> Result<ProcessWithdrawalRequest, TransitionError> {
    let transition = withdrawal_transition(current, action).ok_or(TransitionError::InvalidTransition {
        from: current.as_str(),
        action: action.as_str(),
    })?;

    if transition.requires_reason && is_blank(rejection_reason) {
        return Err(TransitionError::ReasonRequired);
    }

    Ok(ProcessWithdrawalRequest {
        status: transition.to,
        notes: non_blank(notes),
        rejection_reason: if transition.requires_reason {
            non_blank(rejection_reason)
        } else {
            None
        },
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionAction {
    Pause,
    Resume,
    Cancel,
}

impl SubscriptionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionAction::Pause => "pause",
            SubscriptionAction::Resume => "resume",
            SubscriptionAction::Cancel => "cancel",
        }
    }
}

pub struct SubscriptionTransition {
    pub from: SubscriptionStatus,
    pub action: SubscriptionAction,
    pub to: SubscriptionStatus,
}

pub static SUBSCRIPTION_TRANSITIONS: &[SubscriptionTransition] = &[
    SubscriptionTransition {
        from: SubscriptionStatus::Active,
        action: SubscriptionAction::Pause,
        to: SubscriptionStatus::Paused,
    },
    SubscriptionTransition {
        from: SubscriptionStatus::Paused,
        action: SubscriptionAction::Resume,
        to: SubscriptionStatus::Active,
    },
    SubscriptionTransition {
        from: SubscriptionStatus::Active,
        action: SubscriptionAction::Cancel,
        to: SubscriptionStatus::Cancelled,
    },
    SubscriptionTransition {
        from: SubscriptionStatus::Paused,
        action: SubscriptionAction::Cancel,
        to: SubscriptionStatus::Cancelled,
    },
];

pub fn subscription_actions(status: SubscriptionStatus) -> Vec<SubscriptionAction> {
    SUBSCRIPTION_TRANSITIONS
        .iter()
        .filter(|t| t.from == status)
        .map(|t| t.action)
        .collect()
}

/// Target status for `action`, or an error when the subscription cannot
/// take it from `current`.
pub fn plan_subscription(
    current: SubscriptionStatus,
    action: SubscriptionAction,
) -> Result<SubscriptionStatus, TransitionError> {
    SUBSCRIPTION_TRANSITIONS
        .iter()
        .find(|t| t.from == current && t.action == action)
        .map(|t| t.to)
        .ok_or(TransitionError::InvalidTransition {
            from: current.as_str(),
            action: action.as_str(),
        })
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
