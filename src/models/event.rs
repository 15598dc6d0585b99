//! Event model
//!
//! An event is one gift-collection occasion (a wedding banquet, a funeral).
//! Events own their gift lists and, optionally, an entry password stored only
//! as a one-way digest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto;

use super::new_id;

/// Visual/ceremonial theme of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventTheme {
    /// Weddings, birthdays, housewarmings
    #[default]
    Festive,
    /// Funerals and memorials
    Solemn,
}

impl EventTheme {
    /// Parse a theme from user or spreadsheet input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "festive" | "喜事" => Some(Self::Festive),
            "solemn" | "丧事" => Some(Self::Solemn),
            _ => None,
        }
    }
}

impl fmt::Display for EventTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Festive => write!(f, "festive"),
            Self::Solemn => write!(f, "solemn"),
        }
    }
}

/// A gift-collection event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier (opaque string)
    pub id: String,

    /// Event name (e.g. "张家婚宴")
    pub name: String,

    /// When gift collection opens
    pub start_date_time: DateTime<Utc>,

    /// When gift collection closes
    pub end_date_time: DateTime<Utc>,

    /// One-way digest of the entry password; empty for passwordless events
    /// (the import path creates these)
    #[serde(default)]
    pub password_hash: String,

    /// Ceremonial theme
    #[serde(default)]
    pub theme: EventTheme,

    /// Name of the person keeping the books
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorder: Option<String>,

    /// When the event was created
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create a new passwordless event
    pub fn new(
        name: impl Into<String>,
        start_date_time: DateTime<Utc>,
        end_date_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            start_date_time,
            end_date_time,
            password_hash: String::new(),
            theme: EventTheme::Festive,
            recorder: None,
            created_at: Utc::now(),
        }
    }

    /// Set the entry password, storing only its digest
    pub fn with_password(mut self, password: &str) -> Self {
        self.password_hash = crypto::hash(password);
        self
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: EventTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Whether this event requires a password
    pub fn is_protected(&self) -> bool {
        !self.password_hash.is_empty()
    }

    /// Check a candidate password against the stored digest
    pub fn verify_password(&self, password: &str) -> bool {
        self.is_protected() && crypto::hash(password) == self.password_hash
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.name.trim().is_empty() {
            return Err(EventValidationError::EmptyName);
        }
        if self.name.chars().count() > 50 {
            return Err(EventValidationError::NameTooLong(self.name.chars().count()));
        }
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.theme)
    }
}

/// Validation errors for events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Event name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Event name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for EventValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_event() -> Event {
        Event::new("张家婚宴", Utc::now(), Utc::now())
    }

    #[test]
    fn test_new_event_is_passwordless() {
        let event = test_event();
        assert!(!event.is_protected());
        assert!(!event.verify_password("anything"));
        assert_eq!(event.theme, EventTheme::Festive);
    }

    #[test]
    fn test_password_verification() {
        let event = test_event().with_password("123456");
        assert!(event.is_protected());
        assert!(event.verify_password("123456"));
        assert!(!event.verify_password("654321"));
    }

    #[test]
    fn test_validation() {
        let mut event = test_event();
        assert!(event.validate().is_ok());

        event.name = String::new();
        assert_eq!(event.validate(), Err(EventValidationError::EmptyName));

        event.name = "宴".repeat(51);
        assert!(matches!(
            event.validate(),
            Err(EventValidationError::NameTooLong(_))
        ));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let event = test_event();
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"startDateTime\""));
        assert!(json.contains("\"passwordHash\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"theme\":\"festive\""));
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!(EventTheme::parse("festive"), Some(EventTheme::Festive));
        assert_eq!(EventTheme::parse("丧事"), Some(EventTheme::Solemn));
        assert_eq!(EventTheme::parse("unknown"), None);
    }
}
