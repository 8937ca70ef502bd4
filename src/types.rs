use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// One selectable appointment slot.
///
/// Every constructed slot gets a fresh v4 id, so two slots with the same
/// label and booking state are still distinct entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSlot {
    id: Uuid,
    time: String,
    is_booked: bool,
}

impl BookingSlot {
    pub fn new(time: impl Into<String>, is_booked: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            time: time.into(),
            is_booked,
        }
    }

    /// Unbooked slot labelled like "10:00 AM".
    pub fn at(time: NaiveTime) -> Self {
        Self::new(time.format("%I:%M %p").to_string(), false)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn is_booked(&self) -> bool {
        self.is_booked
    }

    /// Snapshot of this slot after it was booked. The id is kept.
    pub fn booked(&self) -> Self {
        Self {
            id: self.id,
            time: self.time.clone(),
            is_booked: true,
        }
    }
}

/// A file known to the backend, optionally cached locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRecord {
    local_location: Option<Url>,
    remote_location: Url,
    download_url: String,
    file_name: String,
    storage_path: Option<String>,
}

impl AttachmentRecord {
    /// The file name defaults to the last path segment of `remote_location`.
    pub fn new(remote_location: Url, download_url: impl Into<String>) -> Self {
        let file_name = remote_location
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();

        Self {
            local_location: None,
            remote_location,
            download_url: download_url.into(),
            file_name,
            storage_path: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_storage_path(mut self, storage_path: impl Into<String>) -> Self {
        self.storage_path = Some(storage_path.into());
        self
    }

    pub fn with_local_location(mut self, local_location: Url) -> Self {
        self.local_location = Some(local_location);
        self
    }

    pub fn local_location(&self) -> Option<&Url> {
        self.local_location.as_ref()
    }

    pub fn remote_location(&self) -> &Url {
        &self.remote_location
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn storage_path(&self) -> Option<&str> {
        self.storage_path.as_deref()
    }

    pub fn is_downloaded(&self) -> bool {
        self.local_location.is_some()
    }

    pub fn rename(&mut self, file_name: impl Into<String>) {
        self.file_name = file_name.into();
    }

    pub fn set_storage_path(&mut self, storage_path: impl Into<String>) {
        self.storage_path = Some(storage_path.into());
    }

    pub fn set_local_location(&mut self, local_location: Url) {
        self.local_location = Some(local_location);
    }
}
