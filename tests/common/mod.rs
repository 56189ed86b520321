use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use serde_json::{Value, json};
use tablebook::validation::ReservationPolicy;
use tablebook::{AppState, Config, Store, routes};

#[allow(dead_code)]
pub mod database;
mod memory_store;

#[allow(unused_imports)]
pub use database::TestDatabase;
#[allow(unused_imports)]
pub use memory_store::MemoryStore;

#[allow(dead_code)]
pub struct TestEnv {
	pub app:   TestServer,
	pub store: Arc<MemoryStore>,
}

impl TestEnv {
	/// Get a test environment backed by an empty in-memory store
	///
	/// # Panics
	/// Panics if building the test server fails
	#[must_use]
	pub fn new() -> Self {
		let store = Arc::new(MemoryStore::default());

		Self::with_store(store.clone(), store)
	}

	/// Get a test environment backed by the given store
	///
	/// # Panics
	/// Panics if building the test server fails
	pub fn with_store(app_store: Store, store: Arc<MemoryStore>) -> Self {
		let state = AppState { config: test_config(), store: app_store };
		let app = routes::get_app_router(state);

		let test_server = TestServer::builder().build(app).unwrap();

		TestEnv { app: test_server, store }
	}

	/// Create a reservation through the API and return its id
	#[allow(dead_code)]
	pub async fn create(&self, data: Value) -> i32 {
		let response =
			self.app.post("/reservations").json(&json!({ "data": data })).await;

		assert_eq!(response.status_code(), StatusCode::CREATED);

		let body = response.json::<Value>();

		i32::try_from(body["data"]["reservation_id"].as_i64().unwrap())
			.unwrap()
	}
}

#[must_use]
pub fn test_config() -> Config {
	Config {
		database_url:    String::new(),
		bind_address:    "127.0.0.1:0".to_string(),
		log_level:       tracing::Level::DEBUG,
		request_timeout: Duration::from_secs(5),
		policy:          ReservationPolicy::default(),
	}
}

/// The first `weekday` strictly after today
#[allow(dead_code)]
#[must_use]
pub fn next(weekday: Weekday) -> NaiveDate {
	let today = Local::now().date_naive();

	(1..=7)
		.filter_map(|n| today.checked_add_days(Days::new(n)))
		.find(|d| d.weekday() == weekday)
		.unwrap()
}

/// The last `weekday` strictly before today
#[allow(dead_code)]
#[must_use]
pub fn previous(weekday: Weekday) -> NaiveDate {
	let today = Local::now().date_naive();

	(1..=7)
		.filter_map(|n| today.checked_sub_days(Days::new(n)))
		.find(|d| d.weekday() == weekday)
		.unwrap()
}

/// A valid reservation payload on the next open Wednesday
#[allow(dead_code)]
#[must_use]
pub fn valid_reservation() -> Value {
	json!({
		"first_name": "Jo",
		"last_name": "Lee",
		"mobile_number": "555-1234",
		"reservation_date": next(Weekday::Wed).to_string(),
		"reservation_time": "18:30",
		"people": 4,
	})
}
