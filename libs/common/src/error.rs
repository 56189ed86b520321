//! Library-wide error types and [`From`] impls

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{NaiveTime, Weekday};
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("{0} was not found")]
	NotFound(String),
	/// Any error related to validating or transitioning a reservation
	#[error(transparent)]
	ReservationError(#[from] ReservationError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// Codes are append-only, a code should never be reused once it has been
	/// assigned
	fn code(&self) -> i32 {
		match self {
			Self::InternalServerError => 1,
			Self::NotFound(_) => 2,
			Self::ValidationError(_) => 3,
			Self::ReservationError(e) => {
				match e {
					ReservationError::MissingData => 4,
					ReservationError::MissingField(_) => 5,
					ReservationError::InvalidField(..) => 6,
					ReservationError::ClosedDay(_) => 7,
					ReservationError::InPast => 8,
					ReservationError::OutsideOpeningHours { .. } => 9,
					ReservationError::StatusNotSettable(_) => 10,
					ReservationError::UnknownStatus(_) => 11,
					ReservationError::Finished => 12,
				}
			},
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = match self {
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ReservationError(_) | Self::ValidationError(_) => {
				StatusCode::BAD_REQUEST
			},
		};

		if status.is_server_error() {
			error!("{self:?}");
		} else {
			debug!("{self:?}");
		}

		let data = serde_json::json!({
			"error": self.to_string(),
			"code": self.code(),
		});

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to validating or transitioning a reservation
#[derive(Debug, Error)]
pub enum ReservationError {
	#[error("request body must contain a 'data' object")]
	MissingData,
	#[error("missing required field '{0}'")]
	MissingField(&'static str),
	#[error("invalid '{0}': {1}")]
	InvalidField(&'static str, &'static str),
	/// The reservation falls on the day the restaurant is closed
	#[error("The restaurant is closed on {}s.", weekday_name(.0))]
	ClosedDay(Weekday),
	#[error(
		"The reservation date is in the past. Only future reservations are \
		 allowed."
	)]
	InPast,
	/// The reservation time is outside of the opening hours
	#[error(
		"Reservations are available from {} to {}.",
		short_time(.open),
		short_time(.close)
	)]
	OutsideOpeningHours { open: NaiveTime, close: NaiveTime },
	/// Only the status transitions driven by seating a table may set these
	#[error("status is {0}")]
	StatusNotSettable(String),
	#[error("status '{0}' is not valid")]
	UnknownStatus(String),
	#[error("a finished reservation cannot be updated")]
	Finished,
}

fn weekday_name(day: &Weekday) -> &'static str {
	match day {
		Weekday::Mon => "Monday",
		Weekday::Tue => "Tuesday",
		Weekday::Wed => "Wednesday",
		Weekday::Thu => "Thursday",
		Weekday::Fri => "Friday",
		Weekday::Sat => "Saturday",
		Weekday::Sun => "Sunday",
	}
}

fn short_time(time: &NaiveTime) -> String { time.format("%H:%M").to_string() }

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let mut repr = errs
			.iter()
			.flat_map(|(field, v)| v.iter().map(move |e| format!("{field}: {e}")))
			.collect::<Vec<String>>();

		repr.sort();

		Self::ValidationError(repr.join("\n"))
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("resource".to_string())
			},
			// Check constraint violation, the pipeline should catch these first
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::CheckViolation,
				info,
			) => Self::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

/// Map malformed query strings to application errors
impl From<QueryRejection> for Error {
	fn from(value: QueryRejection) -> Self {
		Self::ValidationError(value.body_text())
	}
}

/// Map malformed path parameters to application errors
impl From<PathRejection> for Error {
	fn from(value: PathRejection) -> Self {
		Self::ValidationError(value.body_text())
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}
