use chrono::NaiveDateTime;
use utoipa::ToSchema;
use crate::auth::UserId;
use crate::event_type::TypeId;
use crate::events::{Event, EventId};

/// Listing row for event overviews and the "joined" page.
#[derive(serde::Serialize, serde::Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct EventShortView {
    #[schema(value_type = i32)]
    pub id: EventId,
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[schema(value_type = i32)]
    pub type_id: TypeId,
    pub type_name: String,
    #[schema(value_type = String)]
    pub organiser_id: UserId,
}

#[derive(serde::Serialize, serde::Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct EventDetailsView {
    #[schema(value_type = i32)]
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[schema(value_type = i32)]
    pub type_id: TypeId,
    pub type_name: String,
    #[schema(value_type = String)]
    pub organiser_id: UserId,
    pub created_on: NaiveDateTime,
}

impl EventShortView {
    pub fn new(event: Event, type_name: String) -> Self {
        EventShortView {
            id: event.id,
            name: event.name,
            start: event.start,
            end: event.end,
            type_id: event.type_id,
            type_name,
            organiser_id: event.organiser_id,
        }
    }
}

impl EventDetailsView {
    pub fn new(event: Event, type_name: String) -> Self {
        EventDetailsView {
            id: event.id,
            name: event.name,
            description: event.description,
            start: event.start,
            end: event.end,
            type_id: event.type_id,
            type_name,
            organiser_id: event.organiser_id,
            created_on: event.created_on,
        }
    }
}
