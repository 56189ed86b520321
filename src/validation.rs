//! The reservation validation pipeline
//!
//! Every check is a [`Gate`], a plain function inspecting a [`Submission`].
//! Gates run in a fixed order and the first failing gate decides the error
//! returned to the client.

use std::sync::LazyLock;

use chrono::{
	DateTime,
	Datelike,
	NaiveDate,
	NaiveDateTime,
	NaiveTime,
	Weekday,
};
use common::{Error, ReservationError};
use db::ReservationStatus;
use regex::Regex;
use reservation::Reservation;
use serde_json::{Map, Value};
use validator::Validate;

use crate::schemas::reservation::ReservationForm;

static TIME_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\d{2}:\d{2}(:\d{2})?$").expect("invalid time regex")
});

/// Business rules a reservation has to respect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReservationPolicy {
	pub opening_time: NaiveTime,
	pub closing_time: NaiveTime,
	pub closed_day:   Weekday,
}

impl Default for ReservationPolicy {
	fn default() -> Self {
		Self {
			opening_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap_or_default(),
			closing_time: NaiveTime::from_hms_opt(21, 30, 0).unwrap_or_default(),
			closed_day:   Weekday::Tue,
		}
	}
}

/// A raw request body together with everything needed to judge it
#[derive(Clone, Copy, Debug)]
pub struct Submission<'a> {
	body:   &'a Value,
	policy: &'a ReservationPolicy,
	now:    NaiveDateTime,
}

/// A single validation step
pub type Gate = fn(&Submission<'_>) -> Result<(), ReservationError>;

/// Gates for creating or fully updating a reservation, in order
pub const RESERVATION_GATES: &[Gate] = &[
	has_data,
	has_contact_fields,
	has_valid_date,
	has_valid_time,
	people_is_not_zero,
	not_on_closed_day,
	not_in_the_past,
	within_opening_hours,
	people_is_positive_integer,
	status_is_settable,
];

/// Gates for a status-only update, in order
pub const STATUS_GATES: &[Gate] = &[has_data, status_is_known];

const CONTACT_FIELDS: [&str; 3] = ["first_name", "last_name", "mobile_number"];

impl<'a> Submission<'a> {
	#[must_use]
	pub fn new(
		body: &'a Value,
		policy: &'a ReservationPolicy,
		now: NaiveDateTime,
	) -> Self {
		Self { body, policy, now }
	}

	fn data(&self) -> Option<&'a Map<String, Value>> {
		self.body.get("data").and_then(Value::as_object)
	}

	/// Get a field of the `data` object, treating `null` as absent
	fn field(&self, name: &str) -> Option<&'a Value> {
		self.data()?.get(name).filter(|v| !v.is_null())
	}

	fn str_field(&self, name: &str) -> Option<&'a str> {
		self.field(name).and_then(Value::as_str)
	}

	fn date(&self) -> Option<NaiveDate> {
		self.str_field("reservation_date").and_then(parse_date)
	}

	fn time(&self) -> Option<NaiveTime> {
		self.str_field("reservation_time").and_then(parse_time)
	}

	fn people(&self) -> Option<i32> {
		self.field("people")
			.and_then(whole_number)
			.and_then(|n| i32::try_from(n).ok())
			.filter(|n| *n > 0)
	}

	fn status(&self) -> Result<Option<ReservationStatus>, ReservationError> {
		let Some(value) = self.field("status") else {
			return Ok(None);
		};

		let Some(status) = value.as_str() else {
			return Err(ReservationError::UnknownStatus(value.to_string()));
		};

		status
			.parse()
			.map(Some)
			.map_err(|_| ReservationError::UnknownStatus(status.to_string()))
	}

	/// Build the typed form, only meaningful after all gates passed
	fn into_form(self) -> Result<ReservationForm, ReservationError> {
		let text = |name: &'static str| {
			self.str_field(name)
				.map(|s| s.trim().to_string())
				.ok_or(ReservationError::MissingField(name))
		};

		Ok(ReservationForm {
			first_name:       text("first_name")?,
			last_name:        text("last_name")?,
			mobile_number:    text("mobile_number")?,
			reservation_date: self
				.date()
				.ok_or(ReservationError::MissingField("reservation_date"))?,
			reservation_time: self
				.time()
				.ok_or(ReservationError::MissingField("reservation_time"))?,
			people:           self
				.people()
				.ok_or(ReservationError::MissingField("people"))?,
			status:           self.status()?,
		})
	}
}

/// An integer, or a float without fractional part such as `4.0`
#[allow(clippy::cast_possible_truncation)]
fn whole_number(value: &Value) -> Option<i64> {
	value.as_i64().or_else(|| {
		value
			.as_f64()
			.filter(|n| n.fract() == 0.0 && n.abs() <= f64::from(i32::MAX))
			.map(|n| n as i64)
	})
}

/// Parse a `YYYY-MM-DD` date, or the date part of an RFC 3339 timestamp
fn parse_date(value: &str) -> Option<NaiveDate> {
	NaiveDate::parse_from_str(value, "%Y-%m-%d")
		.ok()
		.or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

/// Parse an `HH:MM` or `HH:MM:SS` time
fn parse_time(value: &str) -> Option<NaiveTime> {
	if !TIME_FORMAT.is_match(value) {
		return None;
	}

	NaiveTime::parse_from_str(value, "%H:%M:%S")
		.or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
		.ok()
}

/// Run the given gates in order, stopping at the first failure
///
/// # Errors
/// Returns the error of the first gate that fails
pub fn run_gates(
	gates: &[Gate],
	submission: &Submission<'_>,
) -> Result<(), ReservationError> {
	gates.iter().try_for_each(|gate| gate(submission))
}

/// Validate a create or update request body into a [`ReservationForm`]
///
/// # Errors
/// Returns the first rule the body violates
pub fn validate_reservation(
	body: &Value,
	policy: &ReservationPolicy,
	now: NaiveDateTime,
) -> Result<ReservationForm, Error> {
	let submission = Submission::new(body, policy, now);

	run_gates(RESERVATION_GATES, &submission)?;

	let form = submission.into_form()?;
	form.validate()?;

	Ok(form)
}

/// Validate a status update request body
///
/// # Errors
/// Returns an error if the body has no data or an unknown status
pub fn validate_status_update(
	body: &Value,
	policy: &ReservationPolicy,
	now: NaiveDateTime,
) -> Result<ReservationStatus, Error> {
	let submission = Submission::new(body, policy, now);

	run_gates(STATUS_GATES, &submission)?;

	let status = submission
		.status()?
		.ok_or(ReservationError::MissingField("status"))?;

	Ok(status)
}

/// Reject any change to a reservation in a terminal state
///
/// # Errors
/// Returns [`ReservationError::Finished`] for finished reservations
pub fn check_not_finished(reservation: &Reservation) -> Result<(), Error> {
	if reservation.status.is_terminal() {
		return Err(ReservationError::Finished.into());
	}

	Ok(())
}

fn has_data(s: &Submission<'_>) -> Result<(), ReservationError> {
	if s.data().is_none() {
		return Err(ReservationError::MissingData);
	}

	Ok(())
}

fn has_contact_fields(s: &Submission<'_>) -> Result<(), ReservationError> {
	for name in CONTACT_FIELDS {
		match s.field(name) {
			None => return Err(ReservationError::MissingField(name)),
			Some(Value::String(v)) if v.trim().is_empty() => {
				return Err(ReservationError::InvalidField(
					name,
					"must not be empty",
				));
			},
			Some(Value::String(_)) => {},
			Some(_) => {
				return Err(ReservationError::InvalidField(
					name,
					"must be a string",
				));
			},
		}
	}

	Ok(())
}

fn has_valid_date(s: &Submission<'_>) -> Result<(), ReservationError> {
	const NAME: &str = "reservation_date";

	match s.field(NAME) {
		None => Err(ReservationError::MissingField(NAME)),
		Some(Value::String(v)) if parse_date(v).is_some() => Ok(()),
		Some(_) => {
			Err(ReservationError::InvalidField(
				NAME,
				"must be a date formatted as YYYY-MM-DD",
			))
		},
	}
}

fn has_valid_time(s: &Submission<'_>) -> Result<(), ReservationError> {
	const NAME: &str = "reservation_time";

	match s.field(NAME) {
		None => Err(ReservationError::MissingField(NAME)),
		Some(Value::String(v)) if parse_time(v).is_some() => Ok(()),
		Some(_) => {
			Err(ReservationError::InvalidField(
				NAME,
				"must be a time formatted as HH:MM",
			))
		},
	}
}

fn people_is_not_zero(s: &Submission<'_>) -> Result<(), ReservationError> {
	let is_zero = s
		.field("people")
		.and_then(Value::as_f64)
		.is_some_and(|n| n == 0.0);

	if is_zero {
		return Err(ReservationError::InvalidField(
			"people",
			"must not be zero",
		));
	}

	Ok(())
}

fn not_on_closed_day(s: &Submission<'_>) -> Result<(), ReservationError> {
	let closed = s.policy.closed_day;

	if s.date().is_some_and(|date| date.weekday() == closed) {
		return Err(ReservationError::ClosedDay(closed));
	}

	Ok(())
}

fn not_in_the_past(s: &Submission<'_>) -> Result<(), ReservationError> {
	let Some(date) = s.date() else {
		return Ok(());
	};

	let in_past = match s.time() {
		Some(time) => date.and_time(time) < s.now,
		None => date < s.now.date(),
	};

	if in_past {
		return Err(ReservationError::InPast);
	}

	Ok(())
}

fn within_opening_hours(s: &Submission<'_>) -> Result<(), ReservationError> {
	let ReservationPolicy { opening_time, closing_time, .. } = *s.policy;

	if s.time().is_some_and(|t| t < opening_time || t > closing_time) {
		return Err(ReservationError::OutsideOpeningHours {
			open:  opening_time,
			close: closing_time,
		});
	}

	Ok(())
}

fn people_is_positive_integer(
	s: &Submission<'_>,
) -> Result<(), ReservationError> {
	if s.field("people").is_none() {
		return Err(ReservationError::MissingField("people"));
	}

	if s.people().is_none() {
		return Err(ReservationError::InvalidField(
			"people",
			"must be a positive integer",
		));
	}

	Ok(())
}

fn status_is_settable(s: &Submission<'_>) -> Result<(), ReservationError> {
	match s.status()? {
		Some(status @ (ReservationStatus::Seated | ReservationStatus::Finished)) => {
			Err(ReservationError::StatusNotSettable(status.to_string()))
		},
		_ => Ok(()),
	}
}

fn status_is_known(s: &Submission<'_>) -> Result<(), ReservationError> {
	match s.status()? {
		Some(_) => Ok(()),
		None => Err(ReservationError::MissingField("status")),
	}
}
