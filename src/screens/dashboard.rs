use crate::models::{Event, EventDraft, EventPatch};
use crate::screens::browser::EventBrowser;
use crate::services::{EventsApi, Session};
use crate::utils::error::{AppError, AppResult};
use crate::utils::response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Events,
    Create,
    Edit,
}

/// Event management screen for a signed-in user.
///
/// Successful mutations are applied to the cached list right after the
/// backend confirms them; nothing is reloaded. A failed mutation changes
/// nothing but the notification queue.
pub struct DashboardScreen {
    browser: EventBrowser,
    session: Session,
    tab: Tab,
    editing: Option<Event>,
    pending_delete: Option<String>,
}

impl DashboardScreen {
    /// Fails with `AuthError` when nobody is signed in.
    pub fn open(api: EventsApi, session: Option<Session>) -> AppResult<Self> {
        let session = session
            .ok_or_else(|| AppError::AuthError("Please log in to manage events".to_string()))?;

        Ok(Self {
            browser: EventBrowser::new(api),
            session,
            tab: Tab::Events,
            editing: None,
            pending_delete: None,
        })
    }

    pub fn browser(&self) -> &EventBrowser {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut EventBrowser {
        &mut self.browser
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn editing(&self) -> Option<&Event> {
        self.editing.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn events(&self) -> Vec<&Event> {
        self.browser.list().visible()
    }

    pub async fn load(&mut self) -> bool {
        self.browser.load().await
    }

    pub async fn search(&mut self, query: &str) -> bool {
        self.browser.search(query).await
    }

    pub async fn view_event(&mut self, id: &str) -> bool {
        self.browser.view_event(id).await
    }

    pub async fn create_event(&mut self, draft: EventDraft) -> bool {
        if let Err(e) = draft.validate() {
            self.browser
                .notify(response::failure("Failed to create event", &e));
            return false;
        }

        self.browser.set_loading(true);
        let result = self.browser.api.create_event(&self.session, draft).await;
        self.browser.set_loading(false);

        match result {
            Ok(event) => {
                self.browser.list.insert_front(event);
                self.tab = Tab::Events;
                self.browser
                    .notify(response::success("Event created successfully!"));
                true
            }
            Err(e) => {
                self.browser
                    .notify(response::failure("Failed to create event", &e));
                false
            }
        }
    }

    /// Opens the edit form for a listed event. Uses the cached copy.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        match self.browser.list().find(id) {
            Some(event) => {
                self.editing = Some(event.clone());
                self.tab = Tab::Edit;
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.tab = Tab::Events;
    }

    /// Applies `patch` to the event opened with `begin_edit`.
    pub async fn update_event(&mut self, patch: EventPatch) -> bool {
        let Some(id) = self.editing.as_ref().map(|e| e.id.clone()) else {
            return false;
        };

        if let Err(e) = patch.validate() {
            self.browser
                .notify(response::failure("Failed to update event", &e));
            return false;
        }

        self.browser.set_loading(true);
        let result = self
            .browser
            .api
            .update_event(&self.session, &id, patch)
            .await;
        self.browser.set_loading(false);

        match result {
            Ok(event) => {
                self.browser.refresh_selected(&id, Some(&event));
                self.browser.list.replace(event);
                self.editing = None;
                self.tab = Tab::Events;
                self.browser
                    .notify(response::success("Event updated successfully!"));
                true
            }
            Err(e) => {
                self.browser
                    .notify(response::failure("Failed to update event", &e));
                false
            }
        }
    }

    /// First step of a delete: remember the id until confirmed or cancelled.
    pub fn confirm_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the event awaiting confirmation. On failure it stays pending.
    pub async fn delete_event(&mut self) -> bool {
        let Some(id) = self.pending_delete.clone() else {
            return false;
        };

        self.browser.set_loading(true);
        let result = self.browser.api.delete_event(&self.session, &id).await;
        self.browser.set_loading(false);

        match result {
            Ok(()) => {
                self.browser.list.remove(&id);
                self.browser.refresh_selected(&id, None);
                if self.editing.as_ref().is_some_and(|e| e.id == id) {
                    self.editing = None;
                    self.tab = Tab::Events;
                }
                self.pending_delete = None;
                self.browser
                    .notify(response::success("Event deleted successfully!"));
                true
            }
            Err(e) => {
                self.browser
                    .notify(response::failure("Failed to delete event", &e));
                false
            }
        }
    }
}
