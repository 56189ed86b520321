//! Controllers for [`Reservation`]s

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{Local, NaiveDateTime};
use common::Error;
use reservation::Reservation;

use crate::Config;
use crate::extractors::{Body, Path, Query};
use crate::schemas::DataResponse;
use crate::schemas::reservation::{ReservationFilter, ReservationResponse};
use crate::store::{ReservationStore, Store};
use crate::validation::{
	check_not_finished,
	validate_reservation,
	validate_status_update,
};

fn now() -> NaiveDateTime { Local::now().naive_local() }

/// Resolve a reservation id to the stored reservation
///
/// # Errors
/// Returns [`Error::NotFound`] if no such reservation exists
pub(crate) async fn find_reservation(
	store: &dyn ReservationStore,
	r_id: i32,
) -> Result<Reservation, Error> {
	store
		.read(r_id)
		.await?
		.ok_or_else(|| Error::NotFound(format!("reservation {r_id}")))
}

/// List reservations for a date, or search them by mobile number
///
/// Without any filter the reservations of today are returned.
#[instrument(skip(store))]
pub(crate) async fn get_reservations(
	State(store): State<Store>,
	Query(filter): Query<ReservationFilter>,
) -> Result<impl IntoResponse, Error> {
	let reservations = match filter {
		ReservationFilter { date: Some(date), .. } => store.list(date).await?,
		ReservationFilter { mobile_number: Some(number), .. } => {
			store.search(&number).await?
		},
		ReservationFilter { .. } => store.list(now().date()).await?,
	};

	let data: Vec<ReservationResponse> =
		reservations.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(DataResponse { data })))
}

/// Create a reservation
#[instrument(skip(config, store))]
pub(crate) async fn create_reservation(
	State(config): State<Config>,
	State(store): State<Store>,
	Body(body): Body,
) -> Result<impl IntoResponse, Error> {
	let form = validate_reservation(&body, &config.policy, now())?;

	let reservation = store.create(form.into()).await?;
	let data = ReservationResponse::from(reservation);

	Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// Get a single reservation
#[instrument(skip(store))]
pub(crate) async fn get_reservation(
	State(store): State<Store>,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let reservation = find_reservation(store.as_ref(), r_id).await?;
	let data = ReservationResponse::from(reservation);

	Ok((StatusCode::OK, Json(DataResponse { data })))
}

/// Replace every field of a reservation
#[instrument(skip(config, store))]
pub(crate) async fn update_reservation(
	State(config): State<Config>,
	State(store): State<Store>,
	Path(r_id): Path<i32>,
	Body(body): Body,
) -> Result<impl IntoResponse, Error> {
	let current = find_reservation(store.as_ref(), r_id).await?;
	check_not_finished(&current)?;

	let form = validate_reservation(&body, &config.policy, now())?;

	let reservation = store.update(r_id, form.into()).await?;
	let data = ReservationResponse::from(reservation);

	Ok((StatusCode::OK, Json(DataResponse { data })))
}

/// Move a reservation to another status
#[instrument(skip(config, store))]
pub(crate) async fn update_reservation_status(
	State(config): State<Config>,
	State(store): State<Store>,
	Path(r_id): Path<i32>,
	Body(body): Body,
) -> Result<impl IntoResponse, Error> {
	let current = find_reservation(store.as_ref(), r_id).await?;
	check_not_finished(&current)?;

	let status = validate_status_update(&body, &config.policy, now())?;

	let reservation = store.update_status(r_id, status).await?;
	let data = ReservationResponse::from(reservation);

	Ok((StatusCode::OK, Json(DataResponse { data })))
}
