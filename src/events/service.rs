//! The single authority for event and participation state changes.
//!
//! Handlers resolve the caller and hand it in explicitly; the service never
//! looks identity up on its own. Ownership, scheduling and category rules are
//! checked here even when the boundary form already validated its fields.

use std::collections::HashMap;
use std::sync::Arc;
use chrono::Local;
use tracing::{debug, info, warn};
use crate::auth::UserId;
use crate::error::{APIError, APIResult};
use crate::event_type::{EventType, TypeId};
use crate::events::{Event, EventId, NewEvent};
use crate::events::form::{EventForm, EventInput};
use crate::events::participation::Participation;
use crate::events::views::{EventDetailsView, EventShortView};
use crate::storage::Storage;

#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn Storage>,
}

impl EventService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        EventService { store }
    }

    pub async fn create_event(&self, caller: &str, input: EventInput) -> APIResult<Event> {
        self.validate(&input).await?;

        let new_event = NewEvent {
            name: input.name,
            description: input.description,
            type_id: input.type_id,
            start: input.start,
            end: input.end,
            organiser_id: caller.to_owned(),
            created_on: Local::now().naive_local(),
        };
        let event = self.store.insert_event(new_event).await?;

        info!(event_id = event.id, organiser = caller, "event created");
        Ok(event)
    }

    pub async fn edit_event(&self, caller: &str, event_id: EventId, input: EventInput) -> APIResult<Event> {
        let mut event = self.get_owned_event(caller, event_id).await?;
        self.validate(&input).await?;

        event.name = input.name;
        event.description = input.description;
        event.type_id = input.type_id;
        event.start = input.start;
        event.end = input.end;

        let event = self.store
            .update_event(&event)
            .await?
            .ok_or(APIError::NotFound)?;

        info!(event_id, organiser = caller, "event edited");
        Ok(event)
    }

    /// Joining twice leaves a single participation and is not an error.
    pub async fn join_event(&self, caller: &str, event_id: EventId) -> APIResult<()> {
        self.get_event(event_id).await?;

        let participation = Participation::new(event_id, caller);
        if self.store.insert_participation(&participation).await? {
            info!(event_id, helper = caller, "joined event");
        } else {
            debug!(event_id, helper = caller, "already joined, nothing to do");
        }

        Ok(())
    }

    /// Leaving an event that was never joined is a no-op.
    pub async fn leave_event(&self, caller: &str, event_id: EventId) -> APIResult<()> {
        let participation = Participation::new(event_id, caller);
        if self.store.delete_participation(&participation).await? {
            info!(event_id, helper = caller, "left event");
        } else {
            debug!(event_id, helper = caller, "not a participant, nothing to do");
        }

        Ok(())
    }

    /// Events `caller` joined, earliest start first.
    pub async fn list_joined_events(&self, caller: &str) -> APIResult<Vec<EventShortView>> {
        let event_ids = self.store.event_ids_of_helper(caller).await?;
        let events = self.store.get_events(&event_ids).await?;

        self.short_views(events).await
    }

    pub async fn list_all_events(&self) -> APIResult<Vec<EventShortView>> {
        let events = self.store.list_events().await?;
        self.short_views(events).await
    }

    pub async fn get_event(&self, event_id: EventId) -> APIResult<Event> {
        self.store
            .get_event(event_id)
            .await?
            .ok_or(APIError::NotFound)
    }

    pub async fn get_event_details(&self, event_id: EventId) -> APIResult<EventDetailsView> {
        let event = self.get_event(event_id).await?;
        let type_name = self.type_name(event.type_id).await?;

        Ok(EventDetailsView::new(event, type_name))
    }

    /// Current values of an event for pre-filling the edit form.
    pub async fn get_edit_form(&self, caller: &str, event_id: EventId) -> APIResult<EventForm> {
        let event = self.get_owned_event(caller, event_id).await?;
        Ok(event.into())
    }

    pub async fn list_types(&self) -> APIResult<Vec<EventType>> {
        self.store.list_types().await
    }

    pub async fn list_participants(&self, event_id: EventId) -> APIResult<Vec<UserId>> {
        self.get_event(event_id).await?;
        self.store.helpers_of_event(event_id).await
    }

    async fn get_owned_event(&self, caller: &str, event_id: EventId) -> APIResult<Event> {
        let event = self.get_event(event_id).await?;

        if event.organiser_id != caller {
            warn!(event_id, caller, "caller is not the organiser");
            return Err(APIError::Forbidden);
        }

        Ok(event)
    }

    async fn validate(&self, input: &EventInput) -> APIResult<()> {
        if input.start >= input.end {
            return Err(APIError::validation("event start must be before its end"));
        }

        if self.store.get_type(input.type_id).await?.is_none() {
            return Err(APIError::validation(format!("unknown event type {}", input.type_id)));
        }

        Ok(())
    }

    async fn type_name(&self, type_id: TypeId) -> APIResult<String> {
        let event_type = self.store
            .get_type(type_id)
            .await?
            .ok_or_else(|| APIError::storage(format!("event type {type_id} is missing")))?;

        Ok(event_type.name)
    }

    async fn short_views(&self, events: Vec<Event>) -> APIResult<Vec<EventShortView>> {
        let type_names: HashMap<TypeId, String> = self.store
            .list_types()
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();

        let mut result = events
            .into_iter()
            .map(|event| {
                let type_name = type_names
                    .get(&event.type_id)
                    .cloned()
                    .ok_or_else(|| APIError::storage(format!("event type {} is missing", event.type_id)))?;
                Ok(EventShortView::new(event, type_name))
            })
            .collect::<APIResult<Vec<_>>>()?;

        result.sort_by(|a, b| {
            a.start.cmp(&b.start).then(a.id.cmp(&b.id))
        });

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDateTime};
    use crate::storage::EventStore;
    use crate::storage::memory::MemoryStorage;
    use super::*;

    fn service() -> EventService {
        EventService::new(Arc::new(MemoryStorage::with_types([
            EventType::new(1, "Animals"),
            EventType::new(2, "Fun"),
        ])))
    }

    fn days_from_now(days: i64) -> NaiveDateTime {
        Local::now().naive_local() + Duration::days(days)
    }

    fn input(name: &str, start_day: i64, end_day: i64) -> EventInput {
        EventInput {
            name: name.to_owned(),
            description: format!("{name} description"),
            type_id: 1,
            start: days_from_now(start_day),
            end: days_from_now(end_day),
        }
    }

    #[tokio::test]
    async fn create_sets_caller_as_organiser() {
        let events = service();

        let event = events.create_event("u1", input("Test Event", 1, 2)).await.unwrap();

        assert_eq!(event.organiser_id, "u1");
        assert_eq!(events.get_event(event.id).await.unwrap(), event);
    }

    #[tokio::test]
    async fn create_rejects_inverted_or_empty_schedule() {
        let events = service();

        let inverted = events.create_event("u1", input("Backwards", 2, 1)).await;
        assert!(matches!(inverted, Err(APIError::Validation(_))));

        let mut zero_length = input("Instant", 1, 1);
        zero_length.end = zero_length.start;
        let zero_length = events.create_event("u1", zero_length).await;
        assert!(matches!(zero_length, Err(APIError::Validation(_))));

        assert!(events.list_all_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_unknown_type() {
        let events = service();
        let mut unknown = input("Test Event", 1, 2);
        unknown.type_id = 999;

        let result = events.create_event("u1", unknown).await;

        assert!(matches!(result, Err(APIError::Validation(_))));
    }

    #[tokio::test]
    async fn edit_by_organiser_keeps_identity() {
        let events = service();
        let original = events.create_event("u1", input("Original Event", 1, 2)).await.unwrap();

        let mut changes = input("Edited Event", 3, 4);
        changes.type_id = 2;
        let edited = events.edit_event("u1", original.id, changes).await.unwrap();

        assert_eq!(edited.id, original.id);
        assert_eq!(edited.organiser_id, "u1");
        assert_eq!(edited.created_on, original.created_on);
        assert_eq!(edited.name, "Edited Event");
        assert_eq!(edited.description, "Edited Event description");
        assert_eq!(edited.type_id, 2);
        assert_eq!(events.get_event(original.id).await.unwrap(), edited);
    }

    #[tokio::test]
    async fn edit_by_stranger_is_forbidden_and_changes_nothing() {
        let events = service();
        let original = events.create_event("u1", input("Original Event", 1, 2)).await.unwrap();

        let result = events.edit_event("u2", original.id, input("Hijacked", 3, 4)).await;

        assert_eq!(result, Err(APIError::Forbidden));
        assert_eq!(events.get_event(original.id).await.unwrap(), original);
    }

    #[tokio::test]
    async fn edit_checks_existence_then_ownership_then_schedule() {
        let events = service();
        let original = events.create_event("u1", input("Original Event", 1, 2)).await.unwrap();

        assert_eq!(events.edit_event("u1", 77, input("Missing", 1, 2)).await, Err(APIError::NotFound));
        assert_eq!(events.edit_event("u2", original.id, input("Backwards", 2, 1)).await, Err(APIError::Forbidden));

        let result = events.edit_event("u1", original.id, input("Backwards", 2, 1)).await;
        assert!(matches!(result, Err(APIError::Validation(_))));
        assert_eq!(events.get_event(original.id).await.unwrap(), original);
    }

    #[tokio::test]
    async fn join_is_idempotent() {
        let events = service();
        let event = events.create_event("u1", input("Joinable Event", 1, 2)).await.unwrap();

        events.join_event("u2", event.id).await.unwrap();
        events.join_event("u2", event.id).await.unwrap();

        assert_eq!(events.list_participants(event.id).await.unwrap(), vec!["u2"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_joins_leave_one_participation() {
        let events = service();
        let event = events.create_event("u1", input("Crowded Event", 1, 2)).await.unwrap();

        let joins: Vec<_> = (0..32)
            .map(|_| {
                let events = events.clone();
                tokio::spawn(async move { events.join_event("u2", event.id).await })
            })
            .collect();

        for join in joins {
            assert_eq!(join.await.unwrap(), Ok(()));
        }
        assert_eq!(events.list_participants(event.id).await.unwrap(), vec!["u2"]);
        assert_eq!(events.list_joined_events("u2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn listing_fails_when_event_type_is_missing() {
        let store = Arc::new(MemoryStorage::with_types([EventType::new(1, "Animals")]));
        let events = EventService::new(store.clone());
        let orphan = store.insert_event(NewEvent {
            name: "Orphan Event".to_owned(),
            description: "Orphan Event description".to_owned(),
            type_id: 42,
            start: days_from_now(1),
            end: days_from_now(2),
            organiser_id: "u1".to_owned(),
            created_on: Local::now().naive_local(),
        }).await.unwrap();
        events.join_event("u2", orphan.id).await.unwrap();

        assert!(matches!(events.list_all_events().await, Err(APIError::Storage(_))));
        assert!(matches!(events.list_joined_events("u2").await, Err(APIError::Storage(_))));
        assert!(matches!(events.get_event_details(orphan.id).await, Err(APIError::Storage(_))));
    }

    #[tokio::test]
    async fn join_unknown_event_is_not_found() {
        let events = service();

        assert_eq!(events.join_event("u1", 5).await, Err(APIError::NotFound));
        assert!(events.list_joined_events("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn leave_without_join_is_a_no_op() {
        let events = service();
        let event = events.create_event("u1", input("Leavable Event", 1, 2)).await.unwrap();

        events.leave_event("u2", event.id).await.unwrap();
        events.leave_event("u2", 404).await.unwrap();

        assert!(events.list_participants(event.id).await.unwrap().is_empty());

        events.join_event("u2", event.id).await.unwrap();
        events.leave_event("u2", event.id).await.unwrap();
        events.leave_event("u2", event.id).await.unwrap();
        assert!(events.list_participants(event.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn joined_lists_only_joined_events_by_start() {
        let events = service();
        let organised = events.create_event("u1", input("Own Event", 1, 2)).await.unwrap();
        let later = events.create_event("u2", input("Later Event", 5, 6)).await.unwrap();
        let sooner = events.create_event("u2", input("Sooner Event", 3, 4)).await.unwrap();
        events.create_event("u2", input("Other Event", 2, 3)).await.unwrap();

        events.join_event("u1", later.id).await.unwrap();
        events.join_event("u1", sooner.id).await.unwrap();
        events.join_event("u3", organised.id).await.unwrap();

        let joined = events.list_joined_events("u1").await.unwrap();

        let ids: Vec<_> = joined.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);
        assert_eq!(joined[0].name, "Sooner Event");
        assert_eq!(joined[0].start, sooner.start);
        assert_eq!(joined[0].end, sooner.end);
        assert_eq!(joined[0].type_name, "Animals");
    }

    #[tokio::test]
    async fn details_and_edit_form() {
        let events = service();
        let event = events.create_event("u1", input("Detailed Event", 1, 2)).await.unwrap();

        let details = events.get_event_details(event.id).await.unwrap();
        assert_eq!(details.type_name, "Animals");
        assert_eq!(details.organiser_id, "u1");
        assert_eq!(details.created_on, event.created_on);

        let form = events.get_edit_form("u1", event.id).await.unwrap();
        assert_eq!(form.name, "Detailed Event");
        assert_eq!(events.get_edit_form("u2", event.id).await, Err(APIError::Forbidden));
        assert_eq!(events.get_event_details(99).await, Err(APIError::NotFound));
    }

    #[tokio::test]
    async fn organiser_and_participant_scenario() {
        let events = service();

        let event = events.create_event("u1", input("Animal Shelter", 1, 2)).await.unwrap();
        assert_eq!(event.organiser_id, "u1");

        let hijack = events.edit_event("u2", event.id, input("Hijacked", 1, 2)).await;
        assert_eq!(hijack, Err(APIError::Forbidden));

        events.join_event("u1", event.id).await.unwrap();
        events.join_event("u1", event.id).await.unwrap();
        assert_eq!(events.list_participants(event.id).await.unwrap().len(), 1);

        events.leave_event("u1", event.id).await.unwrap();
        assert_eq!(events.list_participants(event.id).await.unwrap().len(), 0);

        let other = events.create_event("u2", input("Park Cleanup", 4, 5)).await.unwrap();
        events.join_event("u1", other.id).await.unwrap();

        let joined = events.list_joined_events("u1").await.unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].id, other.id);
        assert_eq!(joined[0].name, "Park Cleanup");
        assert_eq!((joined[0].start, joined[0].end), (other.start, other.end));
    }
}
