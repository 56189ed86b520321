use std::sync::RwLock;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use db::ReservationStatus;
use reservation::{
	NewReservation,
	Reservation,
	ReservationUpdate,
	mobile_digits,
};
use tablebook::{Error, ReservationStore};

/// An in-memory [`ReservationStore`] mirroring the postgres queries
#[derive(Default)]
pub struct MemoryStore {
	next_id:      AtomicI32,
	reservations: RwLock<Vec<Reservation>>,
}

#[allow(dead_code)]
impl MemoryStore {
	/// Insert a reservation directly, bypassing the validation pipeline
	pub async fn insert(&self, new: NewReservation) -> Reservation {
		let now = Local::now().naive_local();

		let reservation = Reservation {
			reservation_id:   self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
			first_name:       new.first_name,
			last_name:        new.last_name,
			mobile_number:    new.mobile_number,
			reservation_date: new.reservation_date,
			reservation_time: new.reservation_time,
			people:           new.people,
			status:           new.status,
			created_at:       now,
			updated_at:       now,
		};

		self.reservations.write().unwrap().push(reservation.clone());

		reservation
	}

	/// Get a stored reservation without going through the API
	pub async fn get(&self, r_id: i32) -> Option<Reservation> {
		self.reservations
			.read()
			.unwrap()
			.iter()
			.find(|r| r.reservation_id == r_id)
			.cloned()
	}

	fn modify<F>(&self, r_id: i32, f: F) -> Result<Reservation, Error>
	where
		F: FnOnce(&mut Reservation),
	{
		let mut reservations = self.reservations.write().unwrap();

		let reservation = reservations
			.iter_mut()
			.find(|r| r.reservation_id == r_id)
			.ok_or_else(|| Error::NotFound(format!("reservation {r_id}")))?;

		f(reservation);
		reservation.updated_at = Local::now().naive_local();

		Ok(reservation.clone())
	}
}

#[async_trait]
impl ReservationStore for MemoryStore {
	async fn list(&self, date: NaiveDate) -> Result<Vec<Reservation>, Error> {
		let mut found: Vec<Reservation> = self
			.reservations
			.read()
			.unwrap()
			.iter()
			.filter(|r| r.reservation_date == date)
			.filter(|r| r.status != ReservationStatus::Finished)
			.cloned()
			.collect();

		found.sort_by_key(|r| (r.reservation_time, r.reservation_id));

		Ok(found)
	}

	async fn search(
		&self,
		mobile_number: &str,
	) -> Result<Vec<Reservation>, Error> {
		let digits = mobile_digits(mobile_number);

		let mut found: Vec<Reservation> = self
			.reservations
			.read()
			.unwrap()
			.iter()
			.filter(|r| {
				r.mobile_number
					.chars()
					.filter(|c| !"() -".contains(*c))
					.collect::<String>()
					.contains(&digits)
			})
			.cloned()
			.collect();

		found.sort_by_key(|r| (r.reservation_date, r.reservation_time));

		Ok(found)
	}

	async fn create(
		&self,
		reservation: NewReservation,
	) -> Result<Reservation, Error> {
		Ok(self.insert(reservation).await)
	}

	async fn read(&self, r_id: i32) -> Result<Option<Reservation>, Error> {
		Ok(self.get(r_id).await)
	}

	async fn update(
		&self,
		r_id: i32,
		update: ReservationUpdate,
	) -> Result<Reservation, Error> {
		self.modify(r_id, move |r| {
			r.first_name = update.first_name;
			r.last_name = update.last_name;
			r.mobile_number = update.mobile_number;
			r.reservation_date = update.reservation_date;
			r.reservation_time = update.reservation_time;
			r.people = update.people;

			if let Some(status) = update.status {
				r.status = status;
			}
		})
	}

	async fn update_status(
		&self,
		r_id: i32,
		status: ReservationStatus,
	) -> Result<Reservation, Error> {
		self.modify(r_id, move |r| r.status = status)
	}

	async fn ping(&self) -> Result<(), Error> { Ok(()) }
}
