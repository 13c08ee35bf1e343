use axum::{Json, Router};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use diesel::prelude::*;
use utoipa::ToSchema;
use crate::auth::{Caller, UserId};
use crate::backend::Backend;
use crate::error::APIResult;
use crate::events::EventId;
use crate::events::service::EventService;
use crate::events::views::EventShortView;
use crate::schema::event_participant;

/// `helper_id` attends `event_id`.
#[derive(serde::Serialize, serde::Deserialize, Insertable, Queryable, Selectable, ToSchema, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = event_participant)]
pub struct Participation {
    #[schema(value_type = i32)]
    pub event_id: EventId,
    #[schema(value_type = String)]
    pub helper_id: UserId,
}

impl Participation {
    pub fn new(event_id: EventId, helper_id: impl Into<UserId>) -> Self {
        Participation {
            event_id,
            helper_id: helper_id.into(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/event/{id}/join",
    responses(
        (status = 200, description = "Caller participates, also when already joined"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn join_event(
    State(events): State<EventService>,
    Caller(caller): Caller,
    Path(e_id): Path<EventId>,
) -> APIResult<()> {
    events.join_event(&caller, e_id).await
}

#[utoipa::path(
    post,
    path = "/event/{id}/leave",
    responses(
        (status = 200, description = "Caller no longer participates")
    )
)]
pub async fn leave_event(
    State(events): State<EventService>,
    Caller(caller): Caller,
    Path(e_id): Path<EventId>,
) -> APIResult<()> {
    events.leave_event(&caller, e_id).await
}

#[utoipa::path(
    get,
    path = "/event/joined",
    responses(
        (status = 200, description = "Events the caller joined, earliest first", body = [EventShortView])
    )
)]
pub async fn get_joined_events(
    State(events): State<EventService>,
    Caller(caller): Caller,
) -> APIResult<Json<Vec<EventShortView>>> {
    let joined = events.list_joined_events(&caller).await?;
    Ok(Json(joined))
}

#[utoipa::path(
    get,
    path = "/event/{id}/participants",
    responses(
        (status = 200, description = "Ids of the participating helpers", body = [String]),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event_participants(
    State(events): State<EventService>,
    Path(e_id): Path<EventId>,
) -> APIResult<Json<Vec<UserId>>> {
    let helpers = events.list_participants(e_id).await?;
    Ok(Json(helpers))
}

pub fn add_participation_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/event/joined", get(get_joined_events))
        .route("/event/:id/join", post(join_event))
        .route("/event/:id/leave", post(leave_event))
        .route("/event/:id/participants", get(get_event_participants))
}
