use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use db::ReservationStatus;
use reservation::{NewReservation, Reservation, ReservationUpdate};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct ReservationResponse {
	pub reservation_id:   i32,
	pub first_name:       String,
	pub last_name:        String,
	pub mobile_number:    String,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	pub people:           i32,
	pub status:           ReservationStatus,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
}

impl From<Reservation> for ReservationResponse {
	fn from(value: Reservation) -> Self {
		Self {
			reservation_id:   value.reservation_id,
			first_name:       value.first_name,
			last_name:        value.last_name,
			mobile_number:    value.mobile_number,
			reservation_date: value.reservation_date,
			reservation_time: value.reservation_time,
			people:           value.people,
			status:           value.status,
			created_at:       value.created_at,
			updated_at:       value.updated_at,
		}
	}
}

/// Query parameters for listing reservations
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ReservationFilter {
	pub date:          Option<NaiveDate>,
	pub mobile_number: Option<String>,
}

/// A reservation request body that passed the validation pipeline
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize, Validate)]
pub struct ReservationForm {
	#[validate(length(min = 1, max = 100))]
	pub first_name:       String,
	#[validate(length(min = 1, max = 100))]
	pub last_name:        String,
	#[validate(length(min = 1, max = 32))]
	pub mobile_number:    String,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	#[validate(range(min = 1))]
	pub people:           i32,
	pub status:           Option<ReservationStatus>,
}

impl From<ReservationForm> for NewReservation {
	fn from(value: ReservationForm) -> Self {
		Self {
			first_name:       value.first_name,
			last_name:        value.last_name,
			mobile_number:    value.mobile_number,
			reservation_date: value.reservation_date,
			reservation_time: value.reservation_time,
			people:           value.people,
			status:           value.status.unwrap_or_default(),
		}
	}
}

impl From<ReservationForm> for ReservationUpdate {
	fn from(value: ReservationForm) -> Self {
		Self {
			first_name:       value.first_name,
			last_name:        value.last_name,
			mobile_number:    value.mobile_number,
			reservation_date: value.reservation_date,
			reservation_time: value.reservation_time,
			people:           value.people,
			status:           value.status,
		}
	}
}
