pub mod auth;
pub mod backend;
pub mod config;
pub mod cors;
pub mod error;
pub mod event_type;
pub mod events;
pub mod open_api;
pub mod schema;
pub mod storage;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use crate::backend::Backend;
use crate::event_type::add_event_type_routes;
use crate::events::add_event_routes;
use crate::events::participation::add_participation_routes;
use crate::open_api::add_swagger_route;

/// Every route of the service, still waiting for its [`Backend`] state.
pub fn router() -> Router<Backend> {
    let mut router = Router::<Backend>::new();
    router = add_swagger_route(router);
    router = add_event_type_routes(router);
    router = add_event_routes(router);
    router = add_participation_routes(router);

    router = router.route("/", get(|| async { "This is the Homies event backend" }));
    router.layer(TraceLayer::new_for_http())
}
