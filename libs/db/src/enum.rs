use std::fmt;
use std::str::FromStr;

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::sql_types::ReservationStatus"]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
	#[default]
	Booked,
	Seated,
	Finished,
	Cancelled,
}

impl ReservationStatus {
	#[must_use]
	pub fn get_variants() -> [&'static str; 4] {
		["booked", "seated", "finished", "cancelled"]
	}

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Booked => "booked",
			Self::Seated => "seated",
			Self::Finished => "finished",
			Self::Cancelled => "cancelled",
		}
	}

	/// A terminal status, nothing about the reservation may change anymore
	#[must_use]
	pub fn is_terminal(self) -> bool { self == Self::Finished }
}

impl fmt::Display for ReservationStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when parsing a status that is not one of the known variants
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
	type Err = UnknownStatus;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"booked" => Ok(Self::Booked),
			"seated" => Ok(Self::Seated),
			"finished" => Ok(Self::Finished),
			"cancelled" => Ok(Self::Cancelled),
			_ => Err(UnknownStatus(s.to_string())),
		}
	}
}
