//! Attaching a worker to a booking.
//!
//! The assignment window comes from the booking's first time window and its
//! scheduled date. Each booking type has its own endpoint; the table below is
//! the only place that knows them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{Booking, BookingType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("Please select a worker")]
    MissingWorker,

    #[error("Booking schedule information is missing")]
    MissingSchedule,

    #[error("A worker is already assigned to this booking")]
    AlreadyAssigned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssignmentTime {
    pub start_time: String,
    pub end_time: String,
}

/// Body shared by all three assignment endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssignWorkerToBookingRequest {
    pub worker_id: String,
    pub assignment_date: String,
    pub assignment_time: AssignmentTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AssignmentSchedule {
    /// `YYYY-MM-DD`
    pub assignment_date: String,
    /// As stored on the booking, e.g. `09:00` or `09:00:30`
    pub start_time: String,
    pub end_time: String,
    /// e.g. "Monday, March 3, 2025"
    pub formatted_date: String,
}

pub struct AssignmentRoute {
    pub booking_type: BookingType,
    pub path: fn(&str) -> String,
}

pub static ASSIGNMENT_ROUTES: &[AssignmentRoute] = &[
    AssignmentRoute {
        booking_type: BookingType::Cleaning,
        path: |id| format!("/admin/cleaning/bookings/{id}/assign-worker"),
    },
    AssignmentRoute {
        booking_type: BookingType::Laundry,
        path: |id| format!("/admin/laundry/bookings/{id}/assign-worker"),
    },
    // The repair service spells its endpoint without the hyphen.
    AssignmentRoute {
        booking_type: BookingType::Repair,
        path: |id| format!("/admin/repair_service/bookings/{id}/assignworker"),
    },
];

pub fn assignment_path(booking_type: BookingType, booking_id: &str) -> Option<String> {
    ASSIGNMENT_ROUTES
        .iter()
        .find(|route| route.booking_type == booking_type)
        .map(|route| (route.path)(booking_id))
}

pub fn derive_schedule(booking: &Booking) -> Result<AssignmentSchedule, AssignmentError> {
    let window = booking
        .cleaning_time
        .first()
        .ok_or(AssignmentError::MissingSchedule)?;
    let date = booking
        .scheduled_date
        .as_deref()
        .and_then(parse_date)
        .ok_or(AssignmentError::MissingSchedule)?;
    let start_time = window_time(&window.opening_time).ok_or(AssignmentError::MissingSchedule)?;
    let end_time = window_time(&window.closing_time).ok_or(AssignmentError::MissingSchedule)?;

    Ok(AssignmentSchedule {
        assignment_date: date.format("%Y-%m-%d").to_string(),
        start_time,
        end_time,
        formatted_date: date.format("%A, %B %-d, %Y").to_string(),
    })
}

/// Validate the selection and build the request body. Performs no I/O, so a
/// rejected assignment never reaches the API.
pub fn prepare_assignment(
    booking: &Booking,
    worker_id: &str,
) -> Result<AssignWorkerToBookingRequest, AssignmentError> {
    let worker_id = worker_id.trim();
    if worker_id.is_empty() {
        return Err(AssignmentError::MissingWorker);
    }
    if booking.agent_assigned {
        return Err(AssignmentError::AlreadyAssigned);
    }
    let schedule = derive_schedule(booking)?;

    Ok(AssignWorkerToBookingRequest {
        worker_id: worker_id.to_string(),
        assignment_date: schedule.assignment_date,
        assignment_time: AssignmentTime {
            start_time: schedule.start_time,
            end_time: schedule.end_time,
        },
    })
}

// Dates arrive as offset timestamps, local ISO date-times or bare dates.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

// Window times go out as stored; only full timestamps are cut to the clock time.
fn window_time(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%H:%M").to_string(),
        Err(_) => raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_booking_type_has_a_distinct_route() {
        let paths: Vec<String> = BookingType::ALL
            .iter()
            .filter_map(|t| assignment_path(*t, "b1"))
            .collect();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[2], "/admin/repair_service/bookings/b1/assignworker");
        assert_ne!(paths[0], paths[1]);
    }

    #[test]
    fn accepts_offset_and_local_timestamps() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3);
        assert_eq!(parse_date("2025-03-03T00:00:00.000Z"), day);
        assert_eq!(parse_date("2025-03-03T00:00:00"), day);
        assert_eq!(parse_date("2025-03-03T08:15:00.250"), day);
        assert_eq!(parse_date("2025-03-03"), day);
        assert_eq!(parse_date("soon"), None);
    }

    #[test]
    fn window_times_keep_their_precision() {
        assert_eq!(window_time(" 09:00:30 ").as_deref(), Some("09:00:30"));
        assert_eq!(window_time("2025-03-03T14:45:00Z").as_deref(), Some("14:45"));
        assert_eq!(window_time("  "), None);
    }
}
