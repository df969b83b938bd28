use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

const MIN_TITLE_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 10;
const MIN_LOCATION_LEN: usize = 3;
const MIN_ORGANIZER_LEN: usize = 3;

/// A listed event as it is persisted under the `events` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub organizer: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub image_url: String,
    pub created_by: String,
}

impl Event {
    /// Case-insensitive substring test over title, description, location and type.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        [
            &self.title,
            &self.description,
            &self.location,
            &self.event_type,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }

    pub fn apply(&mut self, patch: EventPatch) {
        let EventPatch {
            title,
            description,
            date,
            time,
            location,
            organizer,
            event_type,
            image_url,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(time) = time {
            self.time = time;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(organizer) = organizer {
            self.organizer = organizer;
        }
        if let Some(event_type) = event_type {
            self.event_type = event_type;
        }
        if let Some(image_url) = image_url {
            self.image_url = image_url;
        }
    }
}

/// Everything needed to create an event; the id and author are assigned on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub organizer: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub image_url: String,
}

impl EventDraft {
    pub fn into_event(self, id: String, created_by: String) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            organizer: self.organizer,
            event_type: self.event_type,
            image_url: self.image_url,
            created_by,
        }
    }

    /// Form-level checks run by the screens before anything reaches storage.
    pub fn validate(&self) -> AppResult<()> {
        check_min_len("Title", &self.title, MIN_TITLE_LEN)?;
        check_min_len("Description", &self.description, MIN_DESCRIPTION_LEN)?;
        check_min_len("Time", &self.time, 1)?;
        check_min_len("Location", &self.location, MIN_LOCATION_LEN)?;
        check_min_len("Organizer", &self.organizer, MIN_ORGANIZER_LEN)?;
        check_event_type(&self.event_type)
    }
}

impl From<Event> for EventDraft {
    fn from(event: Event) -> Self {
        EventDraft {
            title: event.title,
            description: event.description,
            date: event.date,
            time: event.time,
            location: event.location,
            organizer: event.organizer,
            event_type: event.event_type,
            image_url: event.image_url,
        }
    }
}

/// Partial update. Absent fields keep their stored value; `id` and
/// `createdBy` cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            check_min_len("Title", title, MIN_TITLE_LEN)?;
        }
        if let Some(description) = &self.description {
            check_min_len("Description", description, MIN_DESCRIPTION_LEN)?;
        }
        if let Some(time) = &self.time {
            check_min_len("Time", time, 1)?;
        }
        if let Some(location) = &self.location {
            check_min_len("Location", location, MIN_LOCATION_LEN)?;
        }
        if let Some(organizer) = &self.organizer {
            check_min_len("Organizer", organizer, MIN_ORGANIZER_LEN)?;
        }
        if let Some(event_type) = &self.event_type {
            check_event_type(event_type)?;
        }
        Ok(())
    }
}

/// Categories offered by the event form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Academic,
    Cultural,
    Sports,
    Career,
    Workshop,
    Seminar,
    Conference,
    Competition,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 9] = [
        EventType::Academic,
        EventType::Cultural,
        EventType::Sports,
        EventType::Career,
        EventType::Workshop,
        EventType::Seminar,
        EventType::Conference,
        EventType::Competition,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Academic => "Academic",
            EventType::Cultural => "Cultural",
            EventType::Sports => "Sports",
            EventType::Career => "Career",
            EventType::Workshop => "Workshop",
            EventType::Seminar => "Seminar",
            EventType::Conference => "Conference",
            EventType::Competition => "Competition",
            EventType::Other => "Other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                AppError::ValidationError(format!("Unknown event type '{}'", trimmed))
            })
    }
}

/// Parses the `yyyy-mm-dd` form used for event dates.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::ValidationError(format!("Date '{}' must be in yyyy-mm-dd form", raw))
    })
}

fn check_min_len(field: &str, value: &str, min: usize) -> AppResult<()> {
    if value.trim().chars().count() < min {
        let message = if min <= 1 {
            format!("{} is required", field)
        } else {
            format!("{} must be at least {} characters", field, min)
        };
        return Err(AppError::ValidationError(message));
    }
    Ok(())
}

fn check_event_type(raw: &str) -> AppResult<()> {
    raw.parse::<EventType>().map(|_| ())
}
