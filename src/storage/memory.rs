//! In-memory storage for dev mode and tests.
//! Data lives in BTree collections behind parking_lot locks and is lost on restart.

use std::collections::{BTreeMap, BTreeSet};
use async_trait::async_trait;
use parking_lot::RwLock;
use crate::auth::UserId;
use crate::error::APIResult;
use crate::event_type::{EventType, TypeId};
use crate::events::{Event, EventId, NewEvent};
use crate::events::participation::Participation;
use crate::storage::{EventStore, ParticipationStore, TypeRegistry};

#[derive(Default)]
pub struct MemoryStorage {
    types: RwLock<BTreeMap<TypeId, EventType>>,
    events: RwLock<BTreeMap<EventId, Event>>,
    participants: RwLock<BTreeSet<(EventId, UserId)>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(types: impl IntoIterator<Item = EventType>) -> Self {
        let storage = Self::new();
        storage.types
            .write()
            .extend(types.into_iter().map(|t| (t.id, t)));
        storage
    }

    /// Storage preloaded with [`EventType::defaults`].
    pub fn seeded() -> Self {
        Self::with_types(EventType::defaults())
    }
}

#[async_trait]
impl TypeRegistry for MemoryStorage {
    async fn get_type(&self, id: TypeId) -> APIResult<Option<EventType>> {
        Ok(self.types.read().get(&id).cloned())
    }

    async fn list_types(&self) -> APIResult<Vec<EventType>> {
        Ok(self.types.read().values().cloned().collect())
    }
}

#[async_trait]
impl EventStore for MemoryStorage {
    async fn get_event(&self, id: EventId) -> APIResult<Option<Event>> {
        Ok(self.events.read().get(&id).cloned())
    }

    async fn list_events(&self) -> APIResult<Vec<Event>> {
        Ok(self.events.read().values().cloned().collect())
    }

    async fn get_events(&self, ids: &[EventId]) -> APIResult<Vec<Event>> {
        let events = self.events.read();
        Ok(ids.iter()
            .filter_map(|id| events.get(id))
            .cloned()
            .collect())
    }

    async fn insert_event(&self, new_event: NewEvent) -> APIResult<Event> {
        let mut events = self.events.write();
        let id = events.keys().next_back().map_or(1, |last| last + 1);

        let event = Event {
            id,
            name: new_event.name,
            description: new_event.description,
            type_id: new_event.type_id,
            start: new_event.start,
            end: new_event.end,
            organiser_id: new_event.organiser_id,
            created_on: new_event.created_on,
        };
        events.insert(id, event.clone());
        Ok(event)
    }

    async fn update_event(&self, e: &Event) -> APIResult<Option<Event>> {
        let mut events = self.events.write();
        let Some(stored) = events.get_mut(&e.id) else {
            return Ok(None);
        };

        stored.name = e.name.clone();
        stored.description = e.description.clone();
        stored.type_id = e.type_id;
        stored.start = e.start;
        stored.end = e.end;
        Ok(Some(stored.clone()))
    }
}

#[async_trait]
impl ParticipationStore for MemoryStorage {
    async fn insert_participation(&self, participation: &Participation) -> APIResult<bool> {
        Ok(self.participants
            .write()
            .insert((participation.event_id, participation.helper_id.clone())))
    }

    async fn delete_participation(&self, participation: &Participation) -> APIResult<bool> {
        Ok(self.participants
            .write()
            .remove(&(participation.event_id, participation.helper_id.clone())))
    }

    async fn event_ids_of_helper(&self, helper_id: &str) -> APIResult<Vec<EventId>> {
        Ok(self.participants
            .read()
            .iter()
            .filter(|(_, helper)| helper == helper_id)
            .map(|(event_id, _)| *event_id)
            .collect())
    }

    async fn helpers_of_event(&self, event_id: EventId) -> APIResult<Vec<UserId>> {
        Ok(self.participants
            .read()
            .range((event_id, String::new())..)
            .take_while(|(id, _)| *id == event_id)
            .map(|(_, helper)| helper.clone())
            .collect())
    }
}
