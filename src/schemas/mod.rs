use serde::{Deserialize, Serialize};

pub mod reservation;

/// Every successful response wraps its payload in a `data` field
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DataResponse<T> {
	pub data: T,
}
