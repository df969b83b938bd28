use chrono::NaiveDate;

use crate::models::Event;
use crate::screens::browser::EventBrowser;
use crate::services::EventsApi;

const UPCOMING_LIMIT: usize = 3;

/// Public landing screen: browse, search and open events; no session needed.
pub struct HomeScreen {
    browser: EventBrowser,
}

impl HomeScreen {
    pub fn new(api: EventsApi) -> Self {
        Self {
            browser: EventBrowser::new(api),
        }
    }

    pub fn browser(&self) -> &EventBrowser {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut EventBrowser {
        &mut self.browser
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

    /// The next few displayed events from `today` on.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&Event> {
        self.browser.list().upcoming(today, UPCOMING_LIMIT)
    }
}
