#[macro_use]
extern crate tracing;

use std::sync::Arc;

use tablebook::{AppState, Config, PgReservationStore, Store, routes};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;

#[tokio::main]
async fn main() {
	// Load the configuration from the environment.
	let config = Config::from_env();

	// Set up the tracing subscriber.
	// This will print out all logs to the console.
	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(config.log_level)
		.init();

	// Create a database pool and the store on top of it.
	let database_pool = config.create_database_pool();
	let store: Store = Arc::new(PgReservationStore::new(database_pool));

	let bind_address = config.bind_address.clone();

	// Create the app router and listener.
	let router = routes::get_app_router(AppState { config, store });

	let listener = TcpListener::bind(&bind_address)
		.await
		.unwrap_or_else(|e| panic!("COULD NOT BIND TO {bind_address} -- {e}"));

	// Start the server.
	info!("listening on {}", listener.local_addr().unwrap());
	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown_handler())
		.await
		.unwrap();
}

/// Gracefully shutdown the server on SIGINT or SIGTERM.
async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}

	info!("shutting down");
}
