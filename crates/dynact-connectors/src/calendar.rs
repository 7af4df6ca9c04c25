//! Google Calendar event normalization
//!
//! Consumers of the calendar connector see a flat event model instead of the
//! nested Calendar API resource.

use chrono::{DateTime, NaiveDate};
use dynact_core::{CustomizeError, Message, MessageCustomizer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventModel {
    pub event_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Attendee e-mail addresses, comma separated.
    pub attendees: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
}

impl CalendarEventModel {
    pub fn from_event(event: &Map<String, JsonValue>) -> Self {
        let (start_date, start_time) = split_when(event.get("start"));
        let (end_date, end_time) = split_when(event.get("end"));

        Self {
            event_id: text(event, "id"),
            title: text(event, "summary"),
            description: text(event, "description"),
            attendees: attendees(event.get("attendees")),
            start_date,
            start_time,
            end_date,
            end_time,
            location: text(event, "location"),
        }
    }
}

fn text(map: &Map<String, JsonValue>, key: &str) -> Option<String> {
    map.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

fn attendees(value: Option<&JsonValue>) -> Option<String> {
    let emails: Vec<&str> = value?
        .as_array()?
        .iter()
        .filter_map(|a| a.get("email").and_then(JsonValue::as_str))
        .collect();
    if emails.is_empty() {
        None
    } else {
        Some(emails.join(","))
    }
}

/// `{"dateTime": ..}` gives date and time, `{"date": ..}` (all-day) only a date.
fn split_when(value: Option<&JsonValue>) -> (Option<String>, Option<String>) {
    let Some(when) = value.and_then(JsonValue::as_object) else {
        return (None, None);
    };
    if let Some(raw) = when.get("dateTime").and_then(JsonValue::as_str) {
        return match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => (
                Some(dt.format("%Y-%m-%d").to_string()),
                Some(dt.format("%H:%M").to_string()),
            ),
            Err(e) => {
                tracing::warn!(value = raw, error = %e, "Unparseable event dateTime");
                (None, None)
            }
        };
    }
    match when.get("date").and_then(JsonValue::as_str) {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => (Some(date.format("%Y-%m-%d").to_string()), None),
            Err(e) => {
                tracing::warn!(value = raw, error = %e, "Unparseable event date");
                (None, None)
            }
        },
        None => (None, None),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarEventsCustomizer;

impl MessageCustomizer for CalendarEventsCustomizer {
    fn name(&self) -> &str {
        "google-calendar-events"
    }

    fn customize(&self, message: &mut Message) -> Result<(), CustomizeError> {
        let JsonValue::Object(event) = &message.body else {
            return Err(CustomizeError::UnexpectedBody(format!(
                "expected a calendar event object, got {}",
                kind_of(&message.body)
            )));
        };
        let model = CalendarEventModel::from_event(event);
        message.body = serde_json::to_value(model)?;
        Ok(())
    }
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
