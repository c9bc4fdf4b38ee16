use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::assignment::{AssignmentError, AssignmentSchedule, derive_schedule, prepare_assignment},
    dto::{
        Ack,
        bookings::{BookingFilters, BookingPayload, BookingsPage},
        workers::{WorkerCandidate, WorkerFilters},
    },
    error::{AppError, AppResult},
    models::Booking,
    services::booking_service,
    state::AppState,
};

use super::{keys, workers};

pub const CREATE: &str = "create-booking";
pub const UPDATE: &str = "update-booking";
pub const DELETE: &str = "delete-booking";
pub const ASSIGN: &str = "assign-worker";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssignmentOutcome {
    pub message: String,
    pub booking_id: String,
    pub worker_id: String,
    pub schedule: AssignmentSchedule,
}

pub async fn list(state: &AppState, filters: &BookingFilters) -> AppResult<BookingsPage> {
    let client = &state.client;
    let key = keys::bookings().with_params(filters);
    Ok(state
        .queries
        .fetch(key, state.config.stale_time, move || booking_service::list_bookings(client, filters))
        .await?)
}

pub async fn get(state: &AppState, id: &str) -> AppResult<Booking> {
    let client = &state.client;
    Ok(state
        .queries
        .fetch(keys::booking(id), state.config.stale_time, move || {
            booking_service::get_booking(client, id)
        })
        .await?)
}

/// The booking as the page last rendered it for `filters`, falling back to
/// the single-booking endpoint when it is not on the cached page.
pub async fn find(state: &AppState, filters: &BookingFilters, id: &str) -> AppResult<Booking> {
    let cached = state
        .queries
        .peek::<BookingsPage>(&keys::bookings().with_params(filters))
        .and_then(|page| page.bookings.into_iter().find(|b| b.id == id));
    match cached {
        Some(booking) => Ok(booking),
        None => get(state, id).await,
    }
}

pub async fn create(state: &AppState, payload: &BookingPayload) -> AppResult<Booking> {
    let client = &state.client;
    state
        .queries
        .mutate(CREATE, &[keys::bookings()], move || booking_service::create_booking(client, payload))
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to create booking"))
}

pub async fn update(state: &AppState, id: &str, payload: &BookingPayload) -> AppResult<Booking> {
    let client = &state.client;
    state
        .queries
        .mutate(UPDATE, &[keys::bookings(), keys::booking(id)], move || {
            booking_service::update_booking(client, id, payload)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to update booking"))
}

pub async fn delete(state: &AppState, id: &str) -> AppResult<Ack> {
    let client = &state.client;
    state
        .queries
        .mutate(DELETE, &[keys::bookings(), keys::booking(id)], move || {
            booking_service::delete_booking(client, id)
        })
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to delete booking"))
}

/// Workers offered in the assignment dialog.
pub async fn candidates(
    state: &AppState,
    search: Option<String>,
    skill: Option<String>,
) -> AppResult<Vec<WorkerCandidate>> {
    let filters = WorkerFilters::candidates(search, skill);
    let page = workers::list(state, &filters).await?;
    Ok(page.workers.into_iter().map(WorkerCandidate::from).collect())
}

pub async fn schedule(state: &AppState, filters: &BookingFilters, id: &str) -> AppResult<AssignmentSchedule> {
    let booking = find(state, filters, id).await?;
    Ok(derive_schedule(&booking)?)
}

/// Attach `worker_id` to booking `id` through the endpoint of the page's
/// current service type. Nothing is sent unless the selection validates.
pub async fn assign(
    state: &AppState,
    filters: &BookingFilters,
    id: &str,
    worker_id: &str,
) -> AppResult<AssignmentOutcome> {
    if worker_id.trim().is_empty() {
        return Err(AssignmentError::MissingWorker.into());
    }
    let booking = find(state, filters, id).await?;
    let body = prepare_assignment(&booking, worker_id)?;
    let schedule = derive_schedule(&booking)?;

    let client = &state.client;
    let booking_type = filters.booking_type;
    let body_ref = &body;
    let response = state
        .queries
        .mutate(
            ASSIGN,
            &[keys::bookings(), keys::booking(id), keys::subscription_details()],
            move || booking_service::assign_worker(client, booking_type, id, body_ref),
        )
        .await
        .map_err(|err| AppError::upstream_or(err, "Failed to assign worker"))?;

    tracing::info!(
        booking_id = id,
        worker_id = %body.worker_id,
        booking_type = booking_type.as_str(),
        "worker assigned"
    );
    let message = if response.message.is_empty() {
        "Worker assigned successfully".to_string()
    } else {
        response.message
    };
    Ok(AssignmentOutcome {
        message,
        booking_id: id.to_string(),
        worker_id: body.worker_id,
        schedule,
    })
}
