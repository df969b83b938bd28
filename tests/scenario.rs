use std::sync::Arc;

use chrono::NaiveDate;

use agora_events::config::LatencyProfile;
use agora_events::models::{EventDraft, EventPatch};
use agora_events::screens::DashboardScreen;
use agora_events::services::{AuthService, EventsApi};
use agora_events::storage::{FileStorage, KeyValueStorage, PersistentStore};

fn services(dir: &std::path::Path) -> (EventsApi, AuthService) {
    let medium: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir));
    let store = PersistentStore::new(medium);
    (
        EventsApi::new(store.clone(), LatencyProfile::none()),
        AuthService::new(store, LatencyProfile::none()),
    )
}

fn test_event() -> EventDraft {
    EventDraft {
        title: "Test Event".to_string(),
        description: "An event created by the scenario test.".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
        time: "03:30 PM".to_string(),
        location: "Old Hall".to_string(),
        organizer: "QA Society".to_string(),
        event_type: "Workshop".to_string(),
        image_url: String::new(),
    }
}

#[tokio::test]
async fn test_full_event_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let (api, auth) = services(dir.path());
    let session = auth.login("tester@example.edu", "secret").await.unwrap();

    let events = api.list_events().await.unwrap();
    assert_eq!(events.len(), 4);
    let symposium = events
        .iter()
        .find(|e| e.title == "Annual Tech Symposium")
        .unwrap();
    assert_eq!(symposium.date, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());

    let created = api.create_event(&session, test_event()).await.unwrap();
    assert_eq!(api.list_events().await.unwrap().len(), 5);
    let fetched = api.get_event(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Test Event");
    assert_eq!(fetched.created_by, session.user_id());

    let patch = EventPatch {
        location: Some("New Hall".to_string()),
        ..Default::default()
    };
    api.update_event(&session, &created.id, patch).await.unwrap();
    let fetched = api.get_event(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.location, "New Hall");
    assert_eq!(fetched.title, "Test Event");

    api.delete_event(&session, &created.id).await.unwrap();
    assert_eq!(api.list_events().await.unwrap().len(), 4);
    assert!(api.get_event(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_state_survives_reopening_storage() {
    let dir = tempfile::tempdir().unwrap();
    let created_id = {
        let (api, auth) = services(dir.path());
        let session = auth.register("Tess", "tess@example.edu", "pw").await.unwrap();
        api.create_event(&session, test_event()).await.unwrap().id
    };

    let (api, auth) = services(dir.path());
    let user = auth.current_user().unwrap().unwrap();
    assert_eq!(user.name, "Tess");
    let events = api.list_events().await.unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events.last().unwrap().id, created_id);
}

#[tokio::test]
async fn test_dashboard_flow_against_files() {
    let dir = tempfile::tempdir().unwrap();
    let (api, auth) = services(dir.path());

    assert!(DashboardScreen::open(api.clone(), auth.current_session().unwrap()).is_err());

    auth.login("tester@example.edu", "secret").await.unwrap();
    let mut dashboard = DashboardScreen::open(api.clone(), auth.current_session().unwrap()).unwrap();
    assert!(dashboard.load().await);
    assert!(dashboard.create_event(test_event()).await);

    assert!(dashboard.search("hall").await);
    let hits: Vec<String> = dashboard.events().iter().map(|e| e.title.clone()).collect();
    assert_eq!(hits, vec!["Test Event"]);

    let id = dashboard.events()[0].id.clone();
    dashboard.confirm_delete(&id);
    assert!(dashboard.delete_event().await);
    assert!(dashboard.events().is_empty());
    assert_eq!(dashboard.browser().list().all().len(), 4);

    // the screen's cache matches what is stored
    let stored = api.list_events().await.unwrap();
    let cached: Vec<_> = dashboard.browser().list().all().to_vec();
    assert_eq!(stored.len(), cached.len());
    assert!(stored.iter().all(|e| cached.contains(e)));

    auth.logout().unwrap();
    assert!(auth.current_session().unwrap().is_none());
}
