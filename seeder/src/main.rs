mod util;

use std::env;

use chrono::{Datelike, Days, Local, NaiveDate, NaiveTime, TimeDelta, Weekday};
use clap::{Error, Parser};
use common::DbConn;
use db::ReservationStatus;
use deadpool_diesel::postgres::{Manager, Pool};
use diesel::RunQueryDsl;
use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::EN;
use rand::{Rng, rng};
use reservation::NewReservation;

use crate::util::{batch_insert, parse_hh_mm};

/// Reservation times are handed out on this grid
const SLOT_MINUTES: i64 = 15;

#[derive(Parser, Debug)]
struct Opt {
	#[arg(long, short = 'r', default_value_t = 1_000)]
	reservations: usize,
	/// How many days ahead of today reservations are spread over
	#[arg(long, short = 'd', default_value_t = 30)]
	days:         u64,
	#[arg(long, default_value = "10:30", value_parser = parse_hh_mm)]
	opening_time: NaiveTime,
	#[arg(long, default_value = "21:30", value_parser = parse_hh_mm)]
	closing_time: NaiveTime,
	#[arg(long, default_value = "Tue")]
	closed_day:   String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let cli = Opt::parse();

	let closed_day = cli.closed_day.parse::<Weekday>().map_err(|_| {
		Error::raw(
			clap::error::ErrorKind::InvalidValue,
			format!("'{}' is not a day of the week\n", cli.closed_day),
		)
	})?;

	if cli.opening_time >= cli.closing_time {
		return Err(Error::raw(
			clap::error::ErrorKind::InvalidValue,
			"the opening time must be before the closing time\n",
		));
	}

	let conn = get_conn().await;

	if cli.reservations > 0 {
		println!("Seeding {} reservations…", cli.reservations);
		let inserted = seed_reservations(&conn, &cli, closed_day).await?;
		println!("Inserted {inserted} reservations");
	}

	Ok(())
}

/// Get a database connection from the pool
async fn get_conn() -> DbConn {
	let database_url = env::var("DATABASE_URL").expect("DATABASE_URL missing");

	let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
	let pool = Pool::builder(manager).build().expect("Failed to create pool");

	pool.get().await.expect("Failed to get a database connection")
}

/// All days within the horizon on which the restaurant is open
fn open_days(from: NaiveDate, days: u64, closed_day: Weekday) -> Vec<NaiveDate> {
	(1..=days)
		.filter_map(|offset| from.checked_add_days(Days::new(offset)))
		.filter(|date| date.weekday() != closed_day)
		.collect()
}

/// All bookable slots between opening and closing time, inclusive
fn slots(opening_time: NaiveTime, closing_time: NaiveTime) -> Vec<NaiveTime> {
	let step = TimeDelta::minutes(SLOT_MINUTES);

	std::iter::successors(Some(opening_time), |t| {
		let next = *t + step;
		(next > *t && next <= closing_time).then_some(next)
	})
	.collect()
}

/// Seed random future reservations during opening hours
async fn seed_reservations(
	conn: &DbConn,
	cli: &Opt,
	closed_day: Weekday,
) -> Result<usize, Error> {
	let mut rng = rng();

	let today = Local::now().date_naive();
	let days = open_days(today, cli.days, closed_day);
	let slots = slots(cli.opening_time, cli.closing_time);

	if days.is_empty() {
		return Ok(0);
	}

	let entries = (0..cli.reservations)
		.map(|_| {
			let status = if rng.random_bool(0.1) {
				ReservationStatus::Cancelled
			} else {
				ReservationStatus::Booked
			};

			NewReservation {
				first_name: FirstName(EN).fake(),
				last_name: LastName(EN).fake(),
				mobile_number: PhoneNumber(EN).fake(),
				reservation_date: days[rng.random_range(0..days.len())],
				reservation_time: slots[rng.random_range(0..slots.len())],
				people: rng.random_range(1..=8),
				status,
			}
		})
		.collect();

	batch_insert(conn, entries, 2 << 10, |conn, chunk| {
		use db::reservation::dsl::*;
		diesel::insert_into(reservation).values(chunk).execute(conn)
	})
	.await
}
