#[macro_use]
extern crate tracing;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use common::{DbConn, Error};
use db::{ReservationStatus, reservation};
use diesel::dsl::now;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};

define_sql_function! {
	/// Postgres `translate(string, from, to)`
	fn translate(string: Text, from: Text, to: Text) -> Text;
}

/// Characters stripped from stored mobile numbers before searching
const MOBILE_NUMBER_PUNCTUATION: &str = "() -";

#[derive(
	Clone,
	Debug,
	Deserialize,
	Identifiable,
	PartialEq,
	Eq,
	Queryable,
	Selectable,
	Serialize,
)]
#[diesel(table_name = reservation)]
#[diesel(primary_key(reservation_id))]
#[diesel(check_for_backend(Pg))]
pub struct Reservation {
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

/// Keep only the digits of a mobile number
#[must_use]
pub fn mobile_digits(mobile_number: &str) -> String {
	mobile_number.chars().filter(char::is_ascii_digit).collect()
}

impl Reservation {
	/// Get a [`Reservation`] by its id, if it exists
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(reservation)
	}

	/// Get all reservations on a given date that are not yet finished,
	/// earliest first
	#[instrument(skip(conn))]
	pub async fn for_date(
		date: NaiveDate,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let reservations = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(reservation_date.eq(date))
					.filter(status.ne(ReservationStatus::Finished))
					.order((reservation_time.asc(), reservation_id.asc()))
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Get all reservations whose mobile number contains the digits of the
	/// given query, ignoring formatting on either side
	#[instrument(skip(conn))]
	pub async fn search_by_mobile_number(
		query: &str,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let pattern = format!("%{}%", mobile_digits(query));

		let reservations = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(
						translate(mobile_number, MOBILE_NUMBER_PUNCTUATION, "")
							.like(pattern),
					)
					.order((reservation_date.asc(), reservation_time.asc()))
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Set the status of the [`Reservation`] with the given id
	#[instrument(skip(conn))]
	pub async fn update_status(
		r_id: i32,
		new_status: ReservationStatus,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::update(reservation.find(r_id))
					.set((status.eq(new_status), updated_at.eq(now)))
					.returning(Self::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound(format!("reservation {r_id}")))?;

		info!("set status of reservation {r_id} to {new_status}");

		Ok(reservation)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct NewReservation {
	pub first_name:       String,
	pub last_name:        String,
	pub mobile_number:    String,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	pub people:           i32,
	pub status:           ReservationStatus,
}

impl NewReservation {
	/// Insert this [`NewReservation`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Reservation, Error> {
		let reservation = conn
			.interact(|conn| {
				use self::reservation::dsl::*;

				diesel::insert_into(reservation)
					.values(self)
					.returning(Reservation::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created reservation {reservation:?}");

		Ok(reservation)
	}
}

/// A full-field update, the status is left as is when it is [`None`]
#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = reservation)]
pub struct ReservationUpdate {
	pub first_name:       String,
	pub last_name:        String,
	pub mobile_number:    String,
	pub reservation_date: NaiveDate,
	pub reservation_time: NaiveTime,
	pub people:           i32,
	pub status:           Option<ReservationStatus>,
}

impl ReservationUpdate {
	/// Apply this update to the [`Reservation`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		r_id: i32,
		conn: &DbConn,
	) -> Result<Reservation, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::update(reservation.find(r_id))
					.set((self, updated_at.eq(now)))
					.returning(Reservation::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound(format!("reservation {r_id}")))?;

		info!("updated reservation {reservation:?}");

		Ok(reservation)
	}
}
