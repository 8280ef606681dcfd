use chrono::{DateTime, Utc};
use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::contact_status::ContactStatus;
use crate::domain::device_info::DeviceInfo;
use crate::domain::location_info::LocationInfo;
use crate::domain::sanitize::{sanitize_input, sanitize_with_limit};
use crate::domain::subscriber_email::SubscriberEmail;

const MAX_NAME_LENGTH: usize = 100;
const MAX_SUBJECT_LENGTH: usize = 200;
const MAX_MESSAGE_LENGTH: usize = 5000;

#[derive(Debug)]
pub struct NewContact {
    pub name: String,
    pub email: SubscriberEmail,
    pub subject: String,
    pub message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactBody {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub recaptcha_token: String,
    #[serde(default)]
    pub screen_width: Option<u32>,
    #[serde(default)]
    pub screen_height: Option<u32>,
}

impl TryFrom<&NewContactBody> for NewContact {
    type Error = String;

    /// Free-text fields are sanitized first, then bounds-checked on their
    /// grapheme count. Errors are fixed, user-safe strings.
    fn try_from(body: &NewContactBody) -> Result<Self, Self::Error> {
        if body.recaptcha_token.trim().is_empty() {
            return Err(String::from("Missing recaptcha token"));
        }

        let name = sanitize_input(&body.name);
        if name.is_empty() || name.graphemes(true).count() > MAX_NAME_LENGTH {
            return Err(String::from("Invalid name"));
        }

        let email = SubscriberEmail::parse(body.email.clone())
            .map_err(|_| String::from("Invalid email"))?;

        let subject = sanitize_input(&body.subject);
        if subject.is_empty() || subject.graphemes(true).count() > MAX_SUBJECT_LENGTH {
            return Err(String::from("Invalid subject"));
        }

        let message = sanitize_with_limit(&body.message, MAX_MESSAGE_LENGTH);
        if message.is_empty() || message.graphemes(true).count() > MAX_MESSAGE_LENGTH {
            return Err(String::from("Invalid message"));
        }

        Ok(NewContact {
            name,
            email,
            subject,
            message,
        })
    }
}

/// A persisted contact-form record. Contacts are append-only: there is no
/// natural dedup key and no code path mutates them after creation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: SubscriberEmail,
    pub subject: String,
    pub message: String,
    pub device: DeviceInfo,
    pub location: LocationInfo,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
