use crate::models::Event;
use crate::screens::list::EventList;
use crate::services::EventsApi;
use crate::utils::response::{self, Notification};

/// State and behavior shared by every screen that lists events: the cached
/// list, the event open in the detail view, the loading flag and the queue of
/// pending notifications.
///
/// Backend failures stop here. They are logged, queued as error
/// notifications and leave the state as it was.
pub struct EventBrowser {
    pub(crate) api: EventsApi,
    pub(crate) list: EventList,
    selected: Option<Event>,
    details_open: bool,
    loading: bool,
    notifications: Vec<Notification>,
}

impl EventBrowser {
    pub fn new(api: EventsApi) -> Self {
        Self {
            api,
            list: EventList::new(),
            selected: None,
            details_open: false,
            loading: false,
            notifications: Vec::new(),
        }
    }

    pub fn list(&self) -> &EventList {
        &self.list
    }

    pub fn selected(&self) -> Option<&Event> {
        self.selected.as_ref()
    }

    pub fn details_open(&self) -> bool {
        self.details_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub async fn load(&mut self) -> bool {
        self.loading = true;
        let result = self.api.list_events().await;
        self.loading = false;

        match result {
            Ok(events) => {
                self.list.replace_all(events);
                true
            }
            Err(e) => {
                self.notify(response::failure("Failed to load events", &e));
                false
            }
        }
    }

    /// An empty or blank query shows the full list again without a backend call.
    pub async fn search(&mut self, query: &str) -> bool {
        if query.trim().is_empty() {
            self.list.clear_search();
            return true;
        }

        self.loading = true;
        let result = self.api.search_events(query).await;
        self.loading = false;

        match result {
            Ok(results) => {
                self.list.show_search_results(query, results);
                true
            }
            Err(e) => {
                self.notify(response::failure("Search failed", &e));
                false
            }
        }
    }

    /// Fetches the event fresh from the backend and opens it in the detail view.
    pub async fn view_event(&mut self, id: &str) -> bool {
        match self.api.get_event(id).await {
            Ok(Some(event)) => {
                self.selected = Some(event);
                self.details_open = true;
                true
            }
            Ok(None) => {
                self.notify(response::info(format!("Event '{}' no longer exists", id)));
                false
            }
            Err(e) => {
                self.notify(response::failure("Failed to load event details", &e));
                false
            }
        }
    }

    pub fn close_details(&mut self) {
        self.details_open = false;
    }

    /// Keeps the detail view in step after the event was edited or removed.
    pub(crate) fn refresh_selected(&mut self, id: &str, event: Option<&Event>) {
        if self.selected.as_ref().is_some_and(|s| s.id == id) {
            self.selected = event.cloned();
            if self.selected.is_none() {
                self.details_open = false;
            }
        }
    }
}
