use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::{
        assignment::AssignmentSchedule,
        filters::{apply_update, go_to_page},
    },
    dto::{
        Ack,
        bookings::{
            AssignWorkerBody, BookingFilters, BookingFiltersUpdate, BookingPayload, BookingRow, CandidateQuery,
        },
        workers::WorkerCandidate,
    },
    error::AppResult,
    middleware::auth::AdminSession,
    models::{Booking, BookingType},
    queries::{
        self,
        bookings::{ASSIGN, AssignmentOutcome, CREATE, DELETE, UPDATE},
    },
    response::{ApiResponse, ListView, Meta},
    routes::params::{PageQuery, is_filtered},
    state::AppState,
};

/// Everything the assignment dialog shows before a worker is picked.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentDialog {
    pub booking: BookingRow,
    pub booking_type: BookingType,
    pub schedule: AssignmentSchedule,
    pub candidates: Vec<WorkerCandidate>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/filters", patch(update_filters))
        .route("/{id}", get(get_booking).put(update_booking).delete(delete_booking))
        .route("/{id}/assignment", get(assignment_dialog))
        .route("/{id}/assign", post(assign_worker))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    params(PageQuery),
    responses(
        (status = 200, description = "Bookings page", body = ApiResponse<ListView<BookingRow, BookingFilters>>)
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<ListView<BookingRow, BookingFilters>>>> {
    let filters = {
        let mut filters = state.views.bookings();
        if let Some(page) = query.page {
            go_to_page(&mut *filters, page);
        }
        filters.clone()
    };
    render(&state, filters).await
}

#[utoipa::path(
    patch,
    path = "/api/bookings/filters",
    request_body = BookingFiltersUpdate,
    responses(
        (status = 200, description = "Bookings page for the new filters", body = ApiResponse<ListView<BookingRow, BookingFilters>>)
    ),
    tag = "Bookings"
)]
pub async fn update_filters(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(update): Json<BookingFiltersUpdate>,
) -> AppResult<Json<ApiResponse<ListView<BookingRow, BookingFilters>>>> {
    let filters = {
        let mut filters = state.views.bookings();
        apply_update(&mut *filters, update);
        filters.clone()
    };
    render(&state, filters).await
}

async fn render(
    state: &AppState,
    filters: BookingFilters,
) -> AppResult<Json<ApiResponse<ListView<BookingRow, BookingFilters>>>> {
    let page = queries::bookings::list(state, &filters).await?;
    let meta = Meta::from_pagination(&page.pagination);
    let rows = page.bookings.into_iter().map(BookingRow::from).collect();

    // The service type is a tab, not a filter.
    let filtered = is_filtered(&BookingFilters {
        booking_type: BookingType::default(),
        ..filters.clone()
    });
    let pending = [CREATE, UPDATE, DELETE, ASSIGN]
        .iter()
        .any(|name| state.queries.is_pending(name));
    let noun = format!("{} bookings", filters.booking_type.as_str());
    let view = ListView::new(rows, filters, meta.clone(), filtered, &noun).pending(pending);
    Ok(Json(ApiResponse::success("Ok", view, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = BookingPayload,
    responses(
        (status = 200, description = "Booking created", body = ApiResponse<Booking>)
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(payload): Json<BookingPayload>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let booking = queries::bookings::create(&state, &payload).await?;
    Ok(Json(ApiResponse::success("Booking created successfully", booking, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking", body = ApiResponse<Booking>),
        (status = 404, description = "Not found")
    ),
    tag = "Bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let booking = queries::bookings::get(&state, &id).await?;
    Ok(Json(ApiResponse::success("Ok", booking, Some(Meta::empty()))))
}

#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    params(("id" = String, Path, description = "Booking id")),
    request_body = BookingPayload,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<Booking>)
    ),
    tag = "Bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<BookingPayload>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let booking = queries::bookings::update(&state, &id, &payload).await?;
    Ok(Json(ApiResponse::success("Booking updated successfully", booking, Some(Meta::empty()))))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking deleted")
    ),
    tag = "Bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<String>>> {
    let Ack { message } = queries::bookings::delete(&state, &id).await?;
    Ok(Json(ApiResponse::success("Booking deleted successfully", message, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}/assignment",
    params(("id" = String, Path, description = "Booking id"), CandidateQuery),
    responses(
        (status = 200, description = "Schedule and worker candidates", body = ApiResponse<AssignmentDialog>),
        (status = 400, description = "Booking schedule information is missing")
    ),
    tag = "Bookings"
)]
pub async fn assignment_dialog(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Query(query): Query<CandidateQuery>,
) -> AppResult<Json<ApiResponse<AssignmentDialog>>> {
    let filters = state.views.bookings().clone();
    let booking = queries::bookings::find(&state, &filters, &id).await?;
    let schedule = queries::bookings::schedule(&state, &filters, &id).await?;
    let candidates = queries::bookings::candidates(&state, query.search, query.skill).await?;
    let data = AssignmentDialog {
        booking: BookingRow::from(booking),
        booking_type: filters.booking_type,
        schedule,
        candidates,
    };
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/assign",
    params(("id" = String, Path, description = "Booking id")),
    request_body = AssignWorkerBody,
    responses(
        (status = 200, description = "Worker assigned", body = ApiResponse<AssignmentOutcome>),
        (status = 400, description = "Validation failed; nothing was sent")
    ),
    tag = "Bookings"
)]
pub async fn assign_worker(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    Json(body): Json<AssignWorkerBody>,
) -> AppResult<Json<ApiResponse<AssignmentOutcome>>> {
    let filters = state.views.bookings().clone();
    let outcome = queries::bookings::assign(&state, &filters, &id, &body.worker_id).await?;
    let message = outcome.message.clone();
    Ok(Json(ApiResponse::success(message, outcome, Some(Meta::empty()))))
}
