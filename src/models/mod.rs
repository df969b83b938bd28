pub mod event;
pub mod user;

pub use event::{parse_date, Event, EventDraft, EventPatch, EventType};
pub use user::User;

use crate::utils::error::AppResult;

const FIXTURE_EVENTS: &str = include_str!("fixtures.json");

/// Events written to storage the first time the collection is listed.
pub fn fixture_events() -> AppResult<Vec<Event>> {
    Ok(serde_json::from_str(FIXTURE_EVENTS)?)
}
