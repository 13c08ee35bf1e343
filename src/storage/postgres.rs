use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use tracing::debug;
use crate::auth::UserId;
use crate::error::{APIError, APIResult};
use crate::event_type::{EventType, TypeId};
use crate::events::{Event, EventId, NewEvent};
use crate::events::participation::Participation;
use crate::schema::{event, event_participant, event_type};
use crate::storage::{EventStore, ParticipationStore, TypeRegistry};

pub type DBPool = bb8::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

pub struct DBConnection (
    pub bb8::PooledConnection<'static, AsyncDieselConnectionManager<AsyncPgConnection>>
);

#[derive(Clone)]
pub struct PgStorage {
    pub db_pool: DBPool
}

impl PgStorage {
    pub async fn new(db_url: &str) -> APIResult<Self> {
        let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);
        let pool = DBPool::builder()
            .build(config)
            .await
            .map_err(APIError::storage)?;

        Ok(PgStorage {
            db_pool: pool,
        })
    }

    pub async fn get_connection(&self) -> APIResult<DBConnection> {
        let conn = self.db_pool
            .get_owned()
            .await
            .map_err(APIError::storage)?;
        Ok(DBConnection(conn))
    }
}

#[async_trait]
impl TypeRegistry for PgStorage {
    async fn get_type(&self, id: TypeId) -> APIResult<Option<EventType>> {
        let mut conn = self.get_connection().await?;

        event_type::table
            .find(id)
            .select(EventType::as_select())
            .first(&mut conn.0)
            .await
            .optional()
            .map_err(APIError::storage)
    }

    async fn list_types(&self) -> APIResult<Vec<EventType>> {
        let mut conn = self.get_connection().await?;

        event_type::table
            .order(event_type::id.asc())
            .select(EventType::as_select())
            .get_results(&mut conn.0)
            .await
            .map_err(APIError::storage)
    }
}

#[async_trait]
impl EventStore for PgStorage {
    async fn get_event(&self, id: EventId) -> APIResult<Option<Event>> {
        let mut conn = self.get_connection().await?;

        event::table
            .find(id)
            .select(Event::as_select())
            .first(&mut conn.0)
            .await
            .optional()
            .map_err(APIError::storage)
    }

    async fn list_events(&self) -> APIResult<Vec<Event>> {
        let mut conn = self.get_connection().await?;

        event::table
            .order((event::start.asc(), event::id.asc()))
            .select(Event::as_select())
            .get_results(&mut conn.0)
            .await
            .map_err(APIError::storage)
    }

    async fn get_events(&self, ids: &[EventId]) -> APIResult<Vec<Event>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.get_connection().await?;

        event::table
            .filter(event::id.eq_any(ids))
            .order((event::start.asc(), event::id.asc()))
            .select(Event::as_select())
            .get_results(&mut conn.0)
            .await
            .map_err(APIError::storage)
    }

    async fn insert_event(&self, new_event: NewEvent) -> APIResult<Event> {
        let mut conn = self.get_connection().await?;

        diesel::insert_into(event::table)
            .values(&new_event)
            .returning(Event::as_returning())
            .get_result(&mut conn.0)
            .await
            .map_err(APIError::storage)
    }

    async fn update_event(&self, e: &Event) -> APIResult<Option<Event>> {
        let mut conn = self.get_connection().await?;

        // organiser_id and created_on never change after insert.
        diesel::update(event::table.find(e.id))
            .set((
                event::name.eq(&e.name),
                event::description.eq(&e.description),
                event::type_id.eq(e.type_id),
                event::start.eq(e.start),
                event::end.eq(e.end),
            ))
            .returning(Event::as_returning())
            .get_result(&mut conn.0)
            .await
            .optional()
            .map_err(APIError::storage)
    }
}

#[async_trait]
impl ParticipationStore for PgStorage {
    async fn insert_participation(&self, participation: &Participation) -> APIResult<bool> {
        let mut conn = self.get_connection().await?;

        // The primary key on (event_id, helper_id) settles concurrent joins.
        let inserted = diesel::insert_into(event_participant::table)
            .values(participation)
            .on_conflict_do_nothing()
            .execute(&mut conn.0)
            .await
            .map_err(APIError::storage)?;

        debug!(event_id = participation.event_id, inserted, "participation insert");
        Ok(inserted > 0)
    }

    async fn delete_participation(&self, participation: &Participation) -> APIResult<bool> {
        let mut conn = self.get_connection().await?;

        let deleted = diesel::delete(event_participant::table)
            .filter(event_participant::event_id.eq(participation.event_id))
            .filter(event_participant::helper_id.eq(&participation.helper_id))
            .execute(&mut conn.0)
            .await
            .map_err(APIError::storage)?;

        Ok(deleted > 0)
    }

    async fn event_ids_of_helper(&self, helper_id: &str) -> APIResult<Vec<EventId>> {
        let mut conn = self.get_connection().await?;

        event_participant::table
            .filter(event_participant::helper_id.eq(helper_id))
            .select(event_participant::event_id)
            .get_results::<EventId>(&mut conn.0)
            .await
            .map_err(APIError::storage)
    }

    async fn helpers_of_event(&self, event_id: EventId) -> APIResult<Vec<UserId>> {
        let mut conn = self.get_connection().await?;

        event_participant::table
            .filter(event_participant::event_id.eq(event_id))
            .order(event_participant::helper_id.asc())
            .select(event_participant::helper_id)
            .get_results::<UserId>(&mut conn.0)
            .await
            .map_err(APIError::storage)
    }
}
