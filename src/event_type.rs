use axum::{Json, Router};
use axum::extract::State;
use axum::routing::get;
use diesel::prelude::*;
use utoipa::ToSchema;
use crate::backend::Backend;
use crate::error::APIResult;
use crate::events::service::EventService;
use crate::schema::event_type;

pub type TypeId = i32;

/// Categories every fresh installation starts with, in id order.
pub const DEFAULT_EVENT_TYPES: [&str; 4] = ["Animals", "Fun", "Discussion", "Work"];

#[derive(serde::Serialize, serde::Deserialize, Queryable, Selectable, ToSchema, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = event_type)]
pub struct EventType {
    #[schema(value_type = i32)]
    pub id: TypeId,
    pub name: String,
}

impl EventType {
    pub fn new(id: TypeId, name: impl Into<String>) -> Self {
        EventType { id, name: name.into() }
    }

    pub fn defaults() -> Vec<EventType> {
        DEFAULT_EVENT_TYPES
            .iter()
            .zip(1..)
            .map(|(name, id)| EventType::new(id, *name))
            .collect()
    }
}

#[utoipa::path(
    get,
    path = "/type/all",
    responses(
        (status = 200, description = "All event categories", body = [EventType])
    )
)]
pub async fn get_type_all(State(events): State<EventService>) -> APIResult<Json<Vec<EventType>>> {
    let types = events.list_types().await?;
    Ok(Json(types))
}

pub fn add_event_type_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/type/all", get(get_type_all))
}
