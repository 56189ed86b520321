//! Extractors whose failures are reported through [`Error`]

use std::convert::Infallible;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Request};
use common::Error;
use serde_json::Value;

/// Path parameters, rejected with a JSON [`Error`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct Path<T>(pub T);

/// Query string parameters, rejected with a JSON [`Error`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct Query<T>(pub T);

/// The raw JSON request body
///
/// A missing, mistyped or unparseable body is read as `null` so the
/// validation pipeline reports it as missing data, after any lookup the
/// handler does first.
#[derive(Debug)]
pub struct Body(pub Value);

impl<S> FromRequest<S> for Body
where
	S: Send + Sync,
{
	type Rejection = Infallible;

	async fn from_request(req: Request, state: &S) -> Result<Self, Infallible> {
		match Json::<Value>::from_request(req, state).await {
			Ok(Json(value)) => Ok(Self(value)),
			Err(rejection) => {
				debug!("unreadable request body -- {}", rejection.body_text());

				Ok(Self(Value::Null))
			},
		}
	}
}
