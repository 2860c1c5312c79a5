//! Calendar events shown in the scheduler.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EventId, Relationship};

/// Kind of touchpoint, taken from the event title prefix (`"email - ..."`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Email,
    PhoneCall,
    Meeting,
    Text,
    Other,
}

impl EventKind {
    /// Classify an event from its title. Matching is case-insensitive.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        let prefix = title.split(" - ").next().unwrap_or_default().to_lowercase();
        match prefix.as_str() {
            "email" => Self::Email,
            "phone_call" => Self::PhoneCall,
            "meeting" => Self::Meeting,
            "text" => Self::Text,
            _ => Self::Other,
        }
    }

    /// Background color used to paint the event.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Email => "#4caf50",
            Self::PhoneCall => "#2196f3",
            Self::Meeting => "#9c27b0",
            Self::Text => "#ff7043",
            Self::Other => "#607d8b",
        }
    }
}

/// A single entry on the agent's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
}

impl CalendarEvent {
    /// Build an event, deriving the color from the title.
    #[must_use]
    pub fn new(id: EventId, title: String, start: NaiveDate, description: Option<String>) -> Self {
        let color = EventKind::from_title(&title).color().to_string();
        Self {
            id,
            title,
            start,
            description,
            color,
        }
    }

    /// The follow-up event for a relationship, if it has a follow-up date.
    #[must_use]
    pub fn follow_up(relationship: &Relationship) -> Option<Self> {
        let start = relationship.follow_up_date?;
        Some(Self::new(
            EventId::new(relationship.id.as_i32()),
            format!("follow_up - {}", relationship.name),
            start,
            relationship.notes.clone(),
        ))
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        EventKind::from_title(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RelationshipId;

    #[test]
    fn test_event_kind_from_title() {
        assert_eq!(EventKind::from_title("email - Intro"), EventKind::Email);
        assert_eq!(EventKind::from_title("Phone_Call - Jane"), EventKind::PhoneCall);
        assert_eq!(EventKind::from_title("meeting - Showing"), EventKind::Meeting);
        assert_eq!(EventKind::from_title("text"), EventKind::Text);
        assert_eq!(EventKind::from_title("lunch - Bob"), EventKind::Other);
        assert_eq!(EventKind::from_title(""), EventKind::Other);
    }

    #[test]
    fn test_event_colors() {
        assert_eq!(EventKind::Email.color(), "#4caf50");
        assert_eq!(EventKind::Other.color(), "#607d8b");
    }

    #[test]
    fn test_follow_up_event() {
        let mut record = Relationship::new(RelationshipId::new(103), "Michael Johnson");
        assert!(CalendarEvent::follow_up(&record).is_none());

        record.follow_up_date = NaiveDate::from_ymd_opt(2025, 3, 5);
        record.notes = Some("Send comps".to_string());
        let event = CalendarEvent::follow_up(&record);
        let Some(event) = event else {
            panic!("expected a follow-up event");
        };

        assert_eq!(event.title, "follow_up - Michael Johnson");
        assert_eq!(event.kind(), EventKind::Other);
        assert_eq!(event.color, "#607d8b");
        assert_eq!(event.description.as_deref(), Some("Send comps"));
    }
}
