use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::contact::{Contact, NewContact};
use crate::domain::contact_status::ContactStatus;
use crate::domain::device_info::DeviceInfo;
use crate::domain::location_info::LocationInfo;
use crate::domain::new_subscriber::NewSubscriber;
use crate::domain::subscriber::Subscriber;
use crate::domain::subscriber_status::SubscriberStatus;

const ID_LENGTH: usize = 16;

/// JSON-file-backed record store. Each collection is one flat file holding a
/// pretty-printed JSON array, rewritten wholesale on every mutation; the
/// store is the only component that touches those files.
///
/// Writes are an unsynchronized read-modify-write of the whole file: two
/// overlapping writers both read the same pre-update array and the later
/// write wins, losing the other's change. Tolerated at this site's traffic;
/// `concurrent_saves_can_lose_an_update` below pins the behavior down.
pub struct FileStore {
    subscribers_path: PathBuf,
    contacts_path: PathBuf,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to write the record file.")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize records.")]
    Serialize(#[from] serde_json::Error),
}

// Read-side failures are kept apart from `StoreError` so the getters can
// treat "no file yet" as the expected first-run case and only warn about
// the operationally interesting ones.
#[derive(thiserror::Error, Debug)]
enum LoadError {
    #[error("record file does not exist yet")]
    NotFound,
    #[error("failed to read the record file")]
    Io(#[source] std::io::Error),
    #[error("failed to parse the record file")]
    Parse(#[source] serde_json::Error),
}

#[derive(Debug, serde::Serialize)]
pub struct SubscriberStats {
    pub total: usize,
    pub active: usize,
    pub unsubscribed: usize,
    pub by_source: HashMap<String, usize>,
    pub by_device: HashMap<String, usize>,
}

#[derive(Debug, serde::Serialize)]
pub struct ContactStats {
    pub total: usize,
    pub by_status: HashMap<String, usize>,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> FileStore {
        let data_dir = data_dir.into();

        FileStore {
            subscribers_path: data_dir.join("subscribers.json"),
            contacts_path: data_dir.join("contacts.json"),
        }
    }

    /// Upserts a subscriber by normalized email. A re-submission refreshes
    /// source/device/location/status and `updated_at` in place; `id`,
    /// `email` and `created_at` are never touched after creation.
    #[tracing::instrument(
        name = "Upsert a subscriber into the record file",
        skip(self, new_subscriber, device, location),
        fields(subscriber_email = %new_subscriber.email.as_ref())
    )]
    pub async fn save_subscriber(
        &self,
        new_subscriber: &NewSubscriber,
        device: DeviceInfo,
        location: LocationInfo,
    ) -> Result<Subscriber, StoreError> {
        let mut subscribers: Vec<Subscriber> = self.load_or_empty(&self.subscribers_path).await;
        let now = Utc::now();

        let existing_index = subscribers
            .iter()
            .position(|subscriber| subscriber.email == new_subscriber.email);

        let subscriber = match existing_index {
            Some(index) => {
                let existing = &mut subscribers[index];
                existing.source = new_subscriber.source;
                existing.device = device;
                existing.location = location;
                existing.status = SubscriberStatus::Active;
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let subscriber = Subscriber {
                    id: generate_record_id(),
                    email: new_subscriber.email.clone(),
                    source: new_subscriber.source,
                    device,
                    location,
                    status: SubscriberStatus::Active,
                    created_at: now,
                    updated_at: now,
                };

                subscribers.push(subscriber.clone());
                subscriber
            }
        };

        self.write_records(&self.subscribers_path, &subscribers)
            .await?;

        Ok(subscriber)
    }

    /// Appends a contact record. Contacts have no dedup key and are never
    /// merged.
    #[tracing::instrument(
        name = "Append a contact into the record file",
        skip(self, new_contact, device, location),
        fields(contact_email = %new_contact.email.as_ref())
    )]
    pub async fn save_contact(
        &self,
        new_contact: NewContact,
        device: DeviceInfo,
        location: LocationInfo,
    ) -> Result<Contact, StoreError> {
        let mut contacts: Vec<Contact> = self.load_or_empty(&self.contacts_path).await;
        let now = Utc::now();

        let contact = Contact {
            id: generate_record_id(),
            name: new_contact.name,
            email: new_contact.email,
            subject: new_contact.subject,
            message: new_contact.message,
            device,
            location,
            status: ContactStatus::New,
            created_at: now,
            updated_at: now,
        };

        contacts.push(contact.clone());

        self.write_records(&self.contacts_path, &contacts).await?;

        Ok(contact)
    }

    pub async fn get_subscribers(&self) -> Vec<Subscriber> {
        self.load_or_empty(&self.subscribers_path).await
    }

    pub async fn get_contacts(&self) -> Vec<Contact> {
        self.load_or_empty(&self.contacts_path).await
    }

    pub async fn subscriber_stats(&self) -> SubscriberStats {
        let subscribers = self.get_subscribers().await;

        let mut by_source: HashMap<String, usize> = HashMap::new();
        let mut by_device: HashMap<String, usize> = HashMap::new();
        let mut active = 0;

        for subscriber in &subscribers {
            *by_source
                .entry(subscriber.source.as_ref().to_string())
                .or_default() += 1;
            *by_device
                .entry(subscriber.device.device_class.clone())
                .or_default() += 1;

            if subscriber.status.is_active() {
                active += 1;
            }
        }

        SubscriberStats {
            total: subscribers.len(),
            active,
            unsubscribed: subscribers.len() - active,
            by_source,
            by_device,
        }
    }

    pub async fn contact_stats(&self) -> ContactStats {
        let contacts = self.get_contacts().await;

        let mut by_status: HashMap<String, usize> = HashMap::new();

        for contact in &contacts {
            *by_status
                .entry(contact.status.as_ref().to_string())
                .or_default() += 1;
        }

        ContactStats {
            total: contacts.len(),
            by_status,
        }
    }

    /// The read path never errors: an absent file is the normal first-run
    /// state and an unreadable one is logged and treated as empty.
    async fn load_or_empty<T: DeserializeOwned>(&self, path: &Path) -> Vec<T> {
        match load_records(path).await {
            Ok(records) => records,
            Err(LoadError::NotFound) => Vec::new(),
            Err(err) => {
                tracing::warn!(
                    "Treating unreadable record file {} as empty: {:?}",
                    path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    async fn write_records<T: Serialize>(
        &self,
        path: &Path,
        records: &[T],
    ) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_string_pretty(records)?;
        tokio::fs::write(path, body).await?;

        Ok(())
    }
}

async fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(LoadError::NotFound),
        Err(err) => return Err(LoadError::Io(err)),
    };

    serde_json::from_str(&raw).map_err(LoadError::Parse)
}

fn generate_record_id() -> String {
    let mut rng = rand::thread_rng();

    std::iter::repeat_with(|| rng.sample(rand::distributions::Alphanumeric))
        .map(char::from)
        .take(ID_LENGTH)
        .collect()
}
