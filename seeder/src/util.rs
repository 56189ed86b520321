use clap::Error;
use clap::error::ErrorKind;
use common::DbConn;
use diesel::PgConnection;

/// Insert items in chunks of at most `chunk_size` using the given inserter
pub async fn batch_insert<T, F>(
	conn: &DbConn,
	mut items: Vec<T>,
	chunk_size: usize,
	inserter: F,
) -> Result<usize, Error>
where
	T: Send + 'static,
	F: Fn(&mut PgConnection, &[T]) -> Result<usize, diesel::result::Error>
		+ Send
		+ Copy
		+ 'static,
{
	let size = items.len();
	let mut total = 0;

	while !items.is_empty() {
		let chunk =
			items.drain(..chunk_size.min(items.len())).collect::<Vec<_>>();
		let chunk_len = chunk.len();

		let insert_len = conn
			.interact(move |c| inserter(c, &chunk))
			.await
			.map_err(|e| Error::raw(ErrorKind::Io, e))?
			.map_err(|e| Error::raw(ErrorKind::Io, e))?;

		total += insert_len;

		println!("Inserted {total}/{size} items");

		if insert_len != chunk_len {
			return Err(Error::raw(
				ErrorKind::Io,
				format!("Inserted {insert_len} items but expected {chunk_len}"),
			));
		}
	}

	Ok(total)
}

/// Parse an `HH:MM` command line argument
pub fn parse_hh_mm(value: &str) -> Result<chrono::NaiveTime, String> {
	chrono::NaiveTime::parse_from_str(value, "%H:%M")
		.map_err(|e| format!("'{value}' is not an HH:MM time -- {e}"))
}
