//! Defines controller functions that correspond to individual routes

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::Error;
use serde_json::{Value, json};

use crate::store::Store;

pub mod reservation;

/// Check if the database connection and webserver are functional
pub(crate) async fn healthcheck(
	State(store): State<Store>,
) -> Result<(StatusCode, Json<Value>), Error> {
	store.ping().await?;

	Ok((StatusCode::OK, Json(json!({ "status": "ok" }))))
}
