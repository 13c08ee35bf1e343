use axum::{Json, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::backend::Backend;
use crate::event_type::*;
use crate::events::*;
use crate::events::form::EventForm;
use crate::events::participation::*;
use crate::events::views::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        openapi,
        get_type_all,
        post_event,
        update_event,
        get_event,
        get_event_details,
        get_event_edit_form,
        get_event_all,
        join_event,
        leave_event,
        get_joined_events,
        get_event_participants
    ),
    components(schemas(
        EventType,
        Event,
        EventForm,
        EventShortView,
        EventDetailsView,
        Participation,
    )))]
struct ApiDoc;

/// Return JSON version of an OpenAPI schema
#[utoipa::path(
    get,
    path = "/api-docs/openapi.json",
    responses(
        (status = 200, description = "JSON file", body = ())
    )
)]
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn add_swagger_route(router: Router<Backend>) -> Router<Backend> {
    router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
