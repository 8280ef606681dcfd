use chrono::{DateTime, Utc};

use crate::domain::device_info::DeviceInfo;
use crate::domain::location_info::LocationInfo;
use crate::domain::subscribe_source::SubscribeSource;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscriber_status::SubscriberStatus;

/// A persisted subscriber record. `id` is minted once and never changes;
/// `created_at` is immutable; everything else is refreshed on re-submission.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: String,
    pub email: SubscriberEmail,
    pub source: SubscribeSource,
    pub device: DeviceInfo,
    pub location: LocationInfo,
    pub status: SubscriberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
