pub mod form;
pub mod participation;
pub mod service;
pub mod views;

use axum::{Json, Router};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use http::StatusCode;
use utoipa::ToSchema;
use crate::auth::{Caller, UserId};
use crate::backend::Backend;
use crate::error::APIResult;
use crate::event_type::TypeId;
use crate::events::form::EventForm;
use crate::events::service::EventService;
use crate::events::views::{EventDetailsView, EventShortView};
use crate::schema::event;

pub type EventId = i32;

#[derive(serde::Serialize, serde::Deserialize, Queryable, Selectable, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = event)]
pub struct Event {
    #[schema(value_type = i32)]
    pub id: EventId,
    pub name: String,
    pub description: String,
    #[schema(value_type = i32)]
    pub type_id: TypeId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[schema(value_type = String)]
    pub organiser_id: UserId,
    pub created_on: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = event)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub type_id: TypeId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub organiser_id: UserId,
    pub created_on: NaiveDateTime,
}

#[utoipa::path(
    post,
    path = "/event",
    request_body = EventForm,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid form, unknown type or start not before end"),
        (status = 401, description = "Missing caller identity")
    )
)]
pub async fn post_event(
    State(events): State<EventService>,
    Caller(caller): Caller,
    Json(form): Json<EventForm>,
) -> APIResult<(StatusCode, Json<Event>)> {
    let input = form.into_input()?;
    let event = events.create_event(&caller, input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    put,
    path = "/event/{id}",
    request_body = EventForm,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Invalid form, unknown type or start not before end"),
        (status = 403, description = "Caller is not the organiser"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    State(events): State<EventService>,
    Caller(caller): Caller,
    Path(e_id): Path<EventId>,
    Json(form): Json<EventForm>,
) -> APIResult<Json<Event>> {
    let input = form.into_input()?;
    let event = events.edit_event(&caller, e_id, input).await?;
    Ok(Json(event))
}

#[utoipa::path(
    get,
    path = "/event/{id}",
    responses(
        (status = 200, description = "The stored event", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(events): State<EventService>,
    Path(e_id): Path<EventId>,
) -> APIResult<Json<Event>> {
    let event = events.get_event(e_id).await?;
    Ok(Json(event))
}

#[utoipa::path(
    get,
    path = "/event/{id}/details",
    responses(
        (status = 200, description = "Event with its type name", body = EventDetailsView),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event_details(
    State(events): State<EventService>,
    Path(e_id): Path<EventId>,
) -> APIResult<Json<EventDetailsView>> {
    let details = events.get_event_details(e_id).await?;
    Ok(Json(details))
}

#[utoipa::path(
    get,
    path = "/event/{id}/edit",
    responses(
        (status = 200, description = "Current values for the edit form", body = EventForm),
        (status = 401, description = "Missing caller identity"),
        (status = 403, description = "Caller is not the organiser"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event_edit_form(
    State(events): State<EventService>,
    Caller(caller): Caller,
    Path(e_id): Path<EventId>,
) -> APIResult<Json<EventForm>> {
    let form = events.get_edit_form(&caller, e_id).await?;
    Ok(Json(form))
}

#[utoipa::path(
    get,
    path = "/event/all",
    responses(
        (status = 200, description = "Every event, earliest first", body = [EventShortView])
    )
)]
pub async fn get_event_all(State(events): State<EventService>) -> APIResult<Json<Vec<EventShortView>>> {
    let all = events.list_all_events().await?;
    Ok(Json(all))
}

pub fn add_event_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/event", post(post_event))
        .route("/event/all", get(get_event_all))
        .route("/event/:id", get(get_event).put(update_event))
        .route("/event/:id/details", get(get_event_details))
        .route("/event/:id/edit", get(get_event_edit_form))
}
