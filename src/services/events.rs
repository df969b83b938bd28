use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::latency::{pause, LatencyProfile};
use crate::models::{fixture_events, Event, EventDraft, EventPatch};
use crate::services::auth::Session;
use crate::services::ids::{IdGenerator, UuidGenerator};
use crate::storage::PersistentStore;
use crate::utils::error::{AppError, AppResult};

const MAX_ID_ATTEMPTS: usize = 16;

/// Event CRUD and search over the stored collection.
///
/// Every call loads the whole collection, works on it in memory and, for
/// mutations, writes the whole collection back. Load-mutate-save cycles are
/// serialized by an async mutex so two concurrent writers cannot drop each
/// other's changes. The guard only covers callers sharing this `EventsApi`
/// (clones share it); other processes writing the same medium still race.
#[derive(Clone)]
pub struct EventsApi {
    store: PersistentStore,
    ids: Arc<dyn IdGenerator>,
    latency: LatencyProfile,
    write_guard: Arc<Mutex<()>>,
}

impl EventsApi {
    pub fn new(store: PersistentStore, latency: LatencyProfile) -> Self {
        Self {
            store,
            ids: Arc::new(UuidGenerator),
            latency,
            write_guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// The stored collection, seeding the fixtures on first use.
    fn stored_events(&self) -> AppResult<Vec<Event>> {
        if let Some(events) = self.store.load_events()? {
            return Ok(events);
        }

        let events = fixture_events()?;
        self.store.save_events(&events)?;
        tracing::info!(count = events.len(), "Seeded event storage with fixtures");
        Ok(events)
    }

    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        pause(self.latency.list).await;
        let _guard = self.write_guard.lock().await;

        let events = self.stored_events()?;
        tracing::debug!(count = events.len(), "Listed events");
        Ok(events)
    }

    /// `Ok(None)` when no event has this exact id.
    pub async fn get_event(&self, id: &str) -> AppResult<Option<Event>> {
        pause(self.latency.get).await;
        let _guard = self.write_guard.lock().await;

        let event = self.stored_events()?.into_iter().find(|e| e.id == id);
        tracing::debug!(id, found = event.is_some(), "Looked up event");
        Ok(event)
    }

    pub async fn create_event(&self, session: &Session, draft: EventDraft) -> AppResult<Event> {
        pause(self.latency.create).await;
        let _guard = self.write_guard.lock().await;

        let mut events = self.stored_events()?;
        let id = self.fresh_id(&events)?;
        let event = draft.into_event(id, session.user_id().to_string());

        events.push(event.clone());
        self.store.save_events(&events)?;

        tracing::info!(
            id = %event.id,
            title = %event.title,
            created_by = %event.created_by,
            "Created event"
        );
        Ok(event)
    }

    pub async fn update_event(
        &self,
        session: &Session,
        id: &str,
        patch: EventPatch,
    ) -> AppResult<Event> {
        pause(self.latency.update).await;
        let _guard = self.write_guard.lock().await;

        let mut events = self.stored_events()?;
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found(id))?;

        event.apply(patch);
        let updated = event.clone();
        self.store.save_events(&events)?;

        tracing::info!(id, user = %session.user_id(), "Updated event");
        Ok(updated)
    }

    pub async fn delete_event(&self, session: &Session, id: &str) -> AppResult<()> {
        pause(self.latency.delete).await;
        let _guard = self.write_guard.lock().await;

        let mut events = self.stored_events()?;
        let index = events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| not_found(id))?;

        events.remove(index);
        self.store.save_events(&events)?;

        tracing::info!(id, user = %session.user_id(), remaining = events.len(), "Deleted event");
        Ok(())
    }

    /// Case-insensitive substring search over title, description, location
    /// and type. An empty query matches every event.
    pub async fn search_events(&self, query: &str) -> AppResult<Vec<Event>> {
        pause(self.latency.search).await;
        let _guard = self.write_guard.lock().await;

        let needle = query.to_lowercase();
        let results: Vec<Event> = self
            .stored_events()?
            .into_iter()
            .filter(|e| e.matches(&needle))
            .collect();

        tracing::debug!(query, hits = results.len(), "Searched events");
        Ok(results)
    }

    fn fresh_id(&self, events: &[Event]) -> AppResult<String> {
        let taken: HashSet<&str> = events.iter().map(|e| e.id.as_str()).collect();

        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !taken.contains(candidate.as_str()) {
                return Ok(candidate);
            }
            tracing::warn!(id = %candidate, "Generated event id already taken, retrying");
        }

        Err(AppError::InternalError(
            "Could not generate a unique event id".to_string(),
        ))
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Event with id '{}' was not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::services::ids::testing::ScriptedIds;
    use crate::storage::{KeyValueStorage, MemoryStorage};
    use chrono::NaiveDate;

    fn api() -> (Arc<MemoryStorage>, EventsApi) {
        let medium = Arc::new(MemoryStorage::new());
        let api = EventsApi::new(PersistentStore::new(medium.clone()), LatencyProfile::none());
        (medium, api)
    }

    fn session() -> Session {
        Session::new(User {
            id: "user-1".to_string(),
            name: "ada".to_string(),
            email: "ada@example.edu".to_string(),
        })
    }

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            description: "A description that is long enough.".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 30).unwrap(),
            time: "05:00 PM".to_string(),
            location: "Library Lawn".to_string(),
            organizer: "Film Society".to_string(),
            event_type: "Cultural".to_string(),
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_first_list_seeds_fixtures() {
        let (medium, api) = api();
        assert!(medium.is_empty());

        let events = api.list_events().await.unwrap();

        assert_eq!(events.len(), 4);
        assert!(medium.has_item("events").unwrap());
        let again = api.list_events().await.unwrap();
        assert_eq!(events, again);
    }

    #[tokio::test]
    async fn test_list_returns_stored_collection_unchanged() {
        let (medium, api) = api();
        medium.set_item("events", "[]").unwrap();

        assert!(api.list_events().await.unwrap().is_empty());
        assert_eq!(medium.get_item("events").unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_malformed_storage_is_reseeded() {
        let (medium, api) = api();
        medium.set_item("events", "garbage").unwrap();

        assert_eq!(api.list_events().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_, api) = api();
        let input = draft("Movie Night");

        let created = api.create_event(&session(), input.clone()).await.unwrap();
        let fetched = api.get_event(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched, input.into_event(created.id.clone(), "user-1".to_string()));
    }

    #[tokio::test]
    async fn test_create_appends_to_end() {
        let (_, api) = api();
        let created = api.create_event(&session(), draft("Movie Night")).await.unwrap();

        let events = api.list_events().await.unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events.last().unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_create_skips_colliding_ids() {
        let (_, api) = api();
        // "1" and "2" belong to fixtures
        let api = api.with_id_generator(Arc::new(ScriptedIds::new(&["1", "2", "fresh"])));

        let created = api.create_event(&session(), draft("Movie Night")).await.unwrap();

        assert_eq!(created.id, "fresh");
        let events = api.list_events().await.unwrap();
        assert_eq!(events.iter().filter(|e| e.id == "1").count(), 1);
    }

    #[tokio::test]
    async fn test_create_gives_up_when_ids_keep_colliding() {
        let (_, api) = api();
        let script = vec!["1"; MAX_ID_ATTEMPTS];
        let api = api.with_id_generator(Arc::new(ScriptedIds::new(&script)));

        let err = api
            .create_event(&session(), draft("Movie Night"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(api.list_events().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (_, api) = api();
        assert!(api.get_event("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let (_, api) = api();
        let patch = EventPatch {
            location: Some("New Hall".to_string()),
            ..Default::default()
        };

        let updated = api.update_event(&session(), "1", patch).await.unwrap();

        assert_eq!(updated.location, "New Hall");
        assert_eq!(updated.title, "Annual Tech Symposium");
        assert_eq!(updated.created_by, "1234");
        assert_eq!(api.get_event("1").await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_leaves_storage() {
        let (medium, api) = api();
        api.list_events().await.unwrap();
        let before = medium.get_item("events").unwrap();

        let err = api
            .update_event(&session(), "missing", EventPatch::default())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(medium.get_item("events").unwrap(), before);
    }

    #[tokio::test]
    async fn test_id_comparison_is_exact() {
        let (_, api) = api();
        let created = api
            .create_event(&session(), draft("Movie Night"))
            .await
            .unwrap();
        let shouted = created.id.to_uppercase();
        assert_ne!(shouted, created.id);

        let err = api
            .update_event(&session(), &shouted, EventPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(api.delete_event(&session(), &shouted).await.is_err());
        assert!(api.get_event(&shouted).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (_, api) = api();

        api.delete_event(&session(), "3").await.unwrap();
        assert_eq!(api.list_events().await.unwrap().len(), 3);

        let err = api.delete_event(&session(), "3").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(api.list_events().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search() {
        let (_, api) = api();

        assert_eq!(api.search_events("").await.unwrap().len(), 4);
        assert!(api.search_events("zzz-no-match").await.unwrap().is_empty());

        let hits = api.search_events("CAMPUS").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Spring Music Festival");

        let by_type = api.search_events("sports").await.unwrap();
        assert_eq!(by_type[0].id, "4");
    }

    #[tokio::test]
    async fn test_search_empty_collection() {
        let (medium, api) = api();
        medium.set_item("events", "[]").unwrap();

        assert!(api.search_events("tech").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_not_lost() {
        let (_, api) = api();
        let mut handles = Vec::new();
        for n in 0..8 {
            let api = api.clone();
            handles.push(tokio::spawn(async move {
                api.create_event(&session(), draft(&format!("Event {}", n)))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(api.list_events().await.unwrap().len(), 12);
    }
}
