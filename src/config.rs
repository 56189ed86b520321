use std::time::Duration;

use chrono::{NaiveTime, Weekday};
use deadpool_diesel::postgres::{Manager, Pool};
use tracing::Level;

use crate::validation::ReservationPolicy;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,

	pub bind_address:    String,
	pub log_level:       Level,
	pub request_timeout: Duration,

	pub policy: ReservationPolicy,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_var_or(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	fn parse_time(var: &str, default: &str) -> NaiveTime {
		let value = Self::get_env_var_or(var, default);

		NaiveTime::parse_from_str(&value, "%H:%M").unwrap_or_else(|_| {
			panic!("{var} must be a time formatted as HH:MM, got '{value}'")
		})
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if a required environment variable is missing or if any
	/// variable cannot be parsed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");

		let bind_address = Self::get_env_var_or("BIND_ADDRESS", "0.0.0.0:80");

		let log_level = Self::get_env_var_or("LOG_LEVEL", "info")
			.parse::<Level>()
			.unwrap_or_else(|_| panic!("LOG_LEVEL must be a tracing level"));

		let request_timeout = Duration::from_secs(
			Self::get_env_var_or("REQUEST_TIMEOUT_SECONDS", "10")
				.parse::<u64>()
				.unwrap_or_else(|_| {
					panic!("REQUEST_TIMEOUT_SECONDS must be a whole number")
				}),
		);

		let opening_time = Self::parse_time("RESTAURANT_OPENING_TIME", "10:30");
		let closing_time = Self::parse_time("RESTAURANT_CLOSING_TIME", "21:30");
		let closed_day = Self::get_env_var_or("RESTAURANT_CLOSED_DAY", "Tue")
			.parse::<Weekday>()
			.unwrap_or_else(|_| {
				panic!("RESTAURANT_CLOSED_DAY must be a day of the week")
			});

		assert!(
			opening_time < closing_time,
			"RESTAURANT_OPENING_TIME must be before RESTAURANT_CLOSING_TIME"
		);

		let policy = ReservationPolicy { opening_time, closing_time, closed_day };

		Self { database_url, bind_address, log_level, request_timeout, policy }
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}
}
