use std::sync::Arc;

use axum_test::TestServer;
use deadpool_diesel::postgres::{Manager, Pool};
use diesel::{Connection, PgConnection, RunQueryDsl, sql_query};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tablebook::{AppState, DbPool, PgReservationStore, routes};
use uuid::Uuid;

use super::test_config;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// A freshly migrated postgres database, dropped again with the guard
pub struct TestDatabase {
	server_url: String,
	name:       String,
	pub pool:   DbPool,
}

impl TestDatabase {
	/// Create a temporary database next to the one at `DATABASE_URL`
	///
	/// Returns [`None`] when `DATABASE_URL` is not set, tests using it
	/// are skipped in that case.
	///
	/// # Panics
	/// Panics if the database cannot be created or migrated
	#[must_use]
	pub fn create() -> Option<Self> {
		let Ok(server_url) = std::env::var("DATABASE_URL") else {
			eprintln!("DATABASE_URL is not set, skipping postgres test");
			return None;
		};

		let (server, _) = server_url.rsplit_once('/')?;
		let name = format!("tablebook_test_{}", Uuid::new_v4().simple());
		let database_url = format!("{server}/{name}");

		let mut conn = PgConnection::establish(&server_url)
			.expect("could not connect to DATABASE_URL");

		sql_query(format!("CREATE DATABASE {name}"))
			.execute(&mut conn)
			.expect("could not create test database");

		PgConnection::establish(&database_url)
			.expect("could not connect to test database")
			.run_pending_migrations(MIGRATIONS)
			.expect("could not run migrations");

		let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
		let pool = Pool::builder(manager).build().expect("could not build pool");

		Some(Self { server_url, name, pool })
	}

	/// A test server for the app running on this database
	///
	/// # Panics
	/// Panics if building the test server fails
	#[must_use]
	pub fn app(&self) -> TestServer {
		let store = Arc::new(PgReservationStore::new(self.pool.clone()));
		let app = routes::get_app_router(AppState { config: test_config(), store });

		TestServer::builder().build(app).unwrap()
	}
}

impl Drop for TestDatabase {
	fn drop(&mut self) {
		self.pool.close();

		let query = format!("DROP DATABASE IF EXISTS {} WITH (FORCE)", self.name);

		let dropped = PgConnection::establish(&self.server_url)
			.map_err(|e| e.to_string())
			.and_then(|mut conn| {
				sql_query(query).execute(&mut conn).map_err(|e| e.to_string())
			});

		if let Err(e) = dropped {
			eprintln!("could not drop test database {} -- {e}", self.name);
		}
	}
}
