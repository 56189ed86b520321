//! The persistence seam between the controllers and the database

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::{DbPool, Error};
use db::ReservationStatus;
use diesel::{RunQueryDsl, sql_query};
use reservation::{NewReservation, Reservation, ReservationUpdate};

/// Shared handle to whichever [`ReservationStore`] the app was built with
pub type Store = Arc<dyn ReservationStore>;

/// Storage operations for [`Reservation`]s
#[async_trait]
pub trait ReservationStore: Send + Sync {
	/// All reservations on `date` that are not finished, ordered by time
	async fn list(&self, date: NaiveDate) -> Result<Vec<Reservation>, Error>;

	/// All reservations whose mobile number contains the digits of
	/// `mobile_number`, ordered by date
	async fn search(
		&self,
		mobile_number: &str,
	) -> Result<Vec<Reservation>, Error>;

	async fn create(
		&self,
		reservation: NewReservation,
	) -> Result<Reservation, Error>;

	async fn read(&self, r_id: i32) -> Result<Option<Reservation>, Error>;

	async fn update(
		&self,
		r_id: i32,
		update: ReservationUpdate,
	) -> Result<Reservation, Error>;

	async fn update_status(
		&self,
		r_id: i32,
		status: ReservationStatus,
	) -> Result<Reservation, Error>;

	/// Check that the store can be reached
	async fn ping(&self) -> Result<(), Error>;
}

/// A [`ReservationStore`] backed by a postgres pool
#[derive(Clone)]
pub struct PgReservationStore {
	pool: DbPool,
}

impl PgReservationStore {
	#[must_use]
	pub fn new(pool: DbPool) -> Self { Self { pool } }
}

#[async_trait]
impl ReservationStore for PgReservationStore {
	async fn list(&self, date: NaiveDate) -> Result<Vec<Reservation>, Error> {
		let conn = self.pool.get().await?;

		Reservation::for_date(date, &conn).await
	}

	async fn search(
		&self,
		mobile_number: &str,
	) -> Result<Vec<Reservation>, Error> {
		let conn = self.pool.get().await?;

		Reservation::search_by_mobile_number(mobile_number, &conn).await
	}

	async fn create(
		&self,
		reservation: NewReservation,
	) -> Result<Reservation, Error> {
		let conn = self.pool.get().await?;

		reservation.insert(&conn).await
	}

	async fn read(&self, r_id: i32) -> Result<Option<Reservation>, Error> {
		let conn = self.pool.get().await?;

		Reservation::get_by_id(r_id, &conn).await
	}

	async fn update(
		&self,
		r_id: i32,
		update: ReservationUpdate,
	) -> Result<Reservation, Error> {
		let conn = self.pool.get().await?;

		update.apply_to(r_id, &conn).await
	}

	async fn update_status(
		&self,
		r_id: i32,
		status: ReservationStatus,
	) -> Result<Reservation, Error> {
		let conn = self.pool.get().await?;

		Reservation::update_status(r_id, status, &conn).await
	}

	async fn ping(&self) -> Result<(), Error> {
		let conn = self.pool.get().await?;

		conn.interact(|conn| sql_query("SELECT 1").execute(conn)).await??;

		Ok(())
	}
}
