//! Persistence seams used by the event service.
//!
//! Every method is a single atomic store operation. Nothing here enforces
//! ownership or scheduling rules; that is the service's job.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use crate::auth::UserId;
use crate::error::APIResult;
use crate::event_type::{EventType, TypeId};
use crate::events::{Event, EventId, NewEvent};
use crate::events::participation::Participation;

#[async_trait]
pub trait TypeRegistry: Send + Sync {
    async fn get_type(&self, id: TypeId) -> APIResult<Option<EventType>>;

    async fn list_types(&self) -> APIResult<Vec<EventType>>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn get_event(&self, id: EventId) -> APIResult<Option<Event>>;

    async fn list_events(&self) -> APIResult<Vec<Event>>;

    /// Events whose id is in `ids`. Unknown ids are skipped.
    async fn get_events(&self, ids: &[EventId]) -> APIResult<Vec<Event>>;

    async fn insert_event(&self, new_event: NewEvent) -> APIResult<Event>;

    /// Writes the mutable columns of `event`. `None` when the row is gone.
    async fn update_event(&self, event: &Event) -> APIResult<Option<Event>>;
}

#[async_trait]
pub trait ParticipationStore: Send + Sync {
    /// `false` when the pair already existed.
    async fn insert_participation(&self, participation: &Participation) -> APIResult<bool>;

    /// `false` when there was nothing to remove.
    async fn delete_participation(&self, participation: &Participation) -> APIResult<bool>;

    async fn event_ids_of_helper(&self, helper_id: &str) -> APIResult<Vec<EventId>>;

    async fn helpers_of_event(&self, event_id: EventId) -> APIResult<Vec<UserId>>;
}

pub trait Storage: TypeRegistry + EventStore + ParticipationStore {}

impl<T> Storage for T where T: TypeRegistry + EventStore + ParticipationStore {}
