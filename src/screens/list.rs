use chrono::NaiveDate;

use crate::models::Event;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Filter {
    #[default]
    All,
    Search {
        query: String,
        hits: Vec<Event>,
    },
}

/// A screen's copy of the event collection plus the active filter.
///
/// A search keeps the records the backend returned, in result order, next to
/// the full list; the full list itself is never touched by a search. Local
/// edits, removals and creations are applied to both so they stay in step.
#[derive(Debug, Clone, Default)]
pub struct EventList {
    events: Vec<Event>,
    filter: Filter,
}

impl EventList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full list and drops any active search.
    pub fn replace_all(&mut self, events: Vec<Event>) {
        self.events = events;
        self.filter = Filter::All;
    }

    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// The displayed subset: everything, or the search hits in result order.
    pub fn visible(&self) -> Vec<&Event> {
        match &self.filter {
            Filter::All => self.events.iter().collect(),
            Filter::Search { hits, .. } => hits.iter().collect(),
        }
    }

    pub fn query(&self) -> Option<&str> {
        match &self.filter {
            Filter::All => None,
            Filter::Search { query, .. } => Some(query.as_str()),
        }
    }

    pub fn show_search_results(&mut self, query: &str, results: Vec<Event>) {
        self.filter = Filter::Search {
            query: query.to_string(),
            hits: results,
        };
    }

    pub fn clear_search(&mut self) {
        self.filter = Filter::All;
    }

    /// Adds a just-created event at the top of the list and of any active
    /// search, so it is visible right away.
    pub fn insert_front(&mut self, event: Event) {
        if let Filter::Search { hits, .. } = &mut self.filter {
            hits.insert(0, event.clone());
        }
        self.events.insert(0, event);
    }

    /// Swaps in the updated copy of an event wherever it is shown. Returns
    /// false if it is neither listed nor among the search hits.
    pub fn replace(&mut self, event: Event) -> bool {
        let mut found = false;
        if let Filter::Search { hits, .. } = &mut self.filter {
            if let Some(slot) = hits.iter_mut().find(|e| e.id == event.id) {
                *slot = event.clone();
                found = true;
            }
        }
        if let Some(slot) = self.events.iter_mut().find(|e| e.id == event.id) {
            *slot = event;
            found = true;
        }
        found
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        let mut found = self.events.len() != before;
        if let Filter::Search { hits, .. } = &mut self.filter {
            let before = hits.len();
            hits.retain(|hit| hit.id != id);
            found |= hits.len() != before;
        }
        found
    }

    /// Displayed events dated `today` or later, soonest first.
    pub fn upcoming(&self, today: NaiveDate, limit: usize) -> Vec<&Event> {
        let mut upcoming: Vec<&Event> = self
            .visible()
            .into_iter()
            .filter(|e| e.date >= today)
            .collect();
        upcoming.sort_by_key(|e| e.date);
        upcoming.truncate(limit);
        upcoming
    }
}
