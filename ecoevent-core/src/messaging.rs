//! Notification log for messages and emergency pickups sent to recycling agencies.

use chrono::{DateTime, Utc};

use crate::model::Agency;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors raised while composing agency messages.
pub enum MessagingError {
    /// The message has no visible content.
    #[error("Message is empty")]
    EmptyMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What kind of notice was sent to an agency.
pub enum NoticeKind {
    /// Free-text message.
    Message,
    /// Request for an unscheduled pickup.
    EmergencyPickup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One entry of the notification log.
pub struct AgencyNotice {
    /// Kind of notice.
    pub kind: NoticeKind,
    /// Name of the addressed agency.
    pub agency: String,
    /// Text shown in the log.
    pub text: String,
    /// When the notice was sent.
    pub sent_at: DateTime<Utc>,
}

impl AgencyNotice {
    /// Compose a free-text message.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::EmptyMessage`] when `body` is blank.
    pub fn message(agency: &Agency, body: &str, sent_at: DateTime<Utc>) -> Result<Self, MessagingError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(MessagingError::EmptyMessage);
        }
        Ok(Self {
            kind: NoticeKind::Message,
            agency: agency.name.clone(),
            text: format!("Message sent to {}: {body}", agency.name),
            sent_at,
        })
    }

    /// Compose an emergency pickup request.
    #[must_use]
    pub fn emergency_pickup(agency: &Agency, sent_at: DateTime<Utc>) -> Self {
        Self {
            kind: NoticeKind::EmergencyPickup,
            agency: agency.name.clone(),
            text: format!("Emergency pickup requested from {}", agency.name),
            sent_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Newest-first log of notices sent during the session.
pub struct MessageCenter {
    notices: Vec<AgencyNotice>,
}

impl MessageCenter {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notice at the front of the log.
    pub fn record(&mut self, notice: AgencyNotice) {
        self.notices.insert(0, notice);
    }

    /// Notices, newest first.
    #[must_use]
    pub fn notices(&self) -> &[AgencyNotice] {
        &self.notices
    }

    /// Whether nothing has been sent yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::AgencyId;

    fn agency() -> Agency {
        Agency {
            id: AgencyId(String::from("1")),
            name: String::from("GreenCycle Solutions"),
            contact: String::from("contact@greencycle.com"),
            specializations: vec![String::from("Plastic")],
            availability: String::from("24/7"),
            rating: None,
            last_pickup: None,
            next_scheduled_pickup: None,
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn blank_messages_are_rejected() {
        assert_eq!(
            AgencyNotice::message(&agency(), "   ", at()),
            Err(MessagingError::EmptyMessage)
        );
    }

    #[test]
    fn message_text_names_agency() {
        let notice = AgencyNotice::message(&agency(), " Bins 2 and 3 overflowing ", at()).unwrap();
        assert_eq!(
            notice.text,
            "Message sent to GreenCycle Solutions: Bins 2 and 3 overflowing"
        );
        assert_eq!(notice.kind, NoticeKind::Message);
    }

    #[test]
    fn log_is_newest_first() {
        let mut center = MessageCenter::new();
        assert!(center.is_empty());
        center.record(AgencyNotice::message(&agency(), "first", at()).unwrap());
        center.record(AgencyNotice::emergency_pickup(&agency(), at()));

        let texts: Vec<&str> = center
            .notices()
            .iter()
            .map(|notice| notice.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec![
                "Emergency pickup requested from GreenCycle Solutions",
                "Message sent to GreenCycle Solutions: first",
            ]
        );
    }
}
