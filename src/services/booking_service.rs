use crate::{
    client::{ApiClient, ClientError, ClientResult},
    domain::assignment::{AssignWorkerToBookingRequest, assignment_path},
    dto::{
        Ack, Envelope,
        bookings::{BookingFilters, BookingPayload, BookingsPage},
    },
    models::{Booking, BookingType},
};

pub async fn list_bookings(client: &ApiClient, filters: &BookingFilters) -> ClientResult<BookingsPage> {
    let response: Envelope<BookingsPage> = client.get_with("/admin/bookings", filters).await?;
    Ok(response.data)
}

pub async fn get_booking(client: &ApiClient, id: &str) -> ClientResult<Booking> {
    let response: Envelope<Booking> = client.get(&format!("/admin/bookings/{id}")).await?;
    Ok(response.data)
}

pub async fn create_booking(client: &ApiClient, payload: &BookingPayload) -> ClientResult<Booking> {
    let response: Envelope<Booking> = client.post("/admin/bookings", payload).await?;
    Ok(response.data)
}

pub async fn update_booking(client: &ApiClient, id: &str, payload: &BookingPayload) -> ClientResult<Booking> {
    let response: Envelope<Booking> = client.put(&format!("/admin/bookings/{id}"), payload).await?;
    Ok(response.data)
}

pub async fn delete_booking(client: &ApiClient, id: &str) -> ClientResult<Ack> {
    client.delete(&format!("/admin/bookings/{id}")).await
}

/// `PATCH` the service-specific assignment endpoint for `booking_type`.
pub async fn assign_worker(
    client: &ApiClient,
    booking_type: BookingType,
    booking_id: &str,
    body: &AssignWorkerToBookingRequest,
) -> ClientResult<Envelope<Option<Booking>>> {
    let path = assignment_path(booking_type, booking_id).ok_or(ClientError::Status {
        status: 400,
        message: Some(format!("No assignment endpoint for {} bookings", booking_type.as_str())),
    })?;
    client.patch(&path, body).await
}
