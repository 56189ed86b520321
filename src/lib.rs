//! # Tablebook, a restaurant reservation backend

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;

mod config;

pub mod controllers;
pub mod extractors;
pub mod routes;
pub mod schemas;
pub mod store;
pub mod validation;

pub use common::{DbConn, DbPool, Error};
pub use config::*;
pub use store::{PgReservationStore, ReservationStore, Store};

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config: Config,
	pub store:  Store,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for Store {
	fn from_ref(input: &AppState) -> Self { input.store.clone() }
}
