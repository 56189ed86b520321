use axum::Router;
use axum::routing::{get, put};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::healthcheck;
use crate::controllers::reservation::{
	create_reservation,
	get_reservation,
	get_reservations,
	update_reservation,
	update_reservation_status,
};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let request_timeout = state.config.request_timeout;

	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/reservations", reservation_routes());

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(request_timeout))
				.layer(CompressionLayer::new())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

/// Reservation routes
fn reservation_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_reservations).post(create_reservation))
		.route(
			"/{reservation_id}",
			get(get_reservation).put(update_reservation),
		)
		.route("/{reservation_id}/status", put(update_reservation_status))
}
