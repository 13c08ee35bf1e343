use axum::Router;
use http::{HeaderName, HeaderValue, Method};
use http::header::{ACCEPT, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONTENT_TYPE};
use tower_http::cors::CorsLayer;
use crate::auth::CALLER_ID_HEADER;
use crate::backend::Backend;

pub fn add_cors_layer(router: Router<Backend>, origins: &[String]) -> anyhow::Result<Router<Backend>> {
    let origins = origins
        .iter()
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    let cors = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT])
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_headers([
            ACCESS_CONTROL_ALLOW_ORIGIN,
            CONTENT_TYPE,
            AUTHORIZATION,
            ACCEPT,
            HeaderName::from_static(CALLER_ID_HEADER),
        ]);

    Ok(router.layer(cors))
}
