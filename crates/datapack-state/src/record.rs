use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RecordId = u64;

pub const DEFAULT_PACK_TITLE: &str = "Data Pack";

/// Launch parameters a pack supplies in place of its catalog entry's defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchOverrides {
    pub application_path: Option<String>,
    pub launch_command:   Option<String>,
    pub mount_parameters: Option<String>,
}

/// One installed or pending data pack.
///
/// `present_on_disk == true` means `path` names a file in the content store
/// whose bytes hash to `sha256`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default)]
    pub id:              Option<RecordId>,
    pub entry_id:        String,
    #[serde(default = "default_title")]
    pub title:           String,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub date_added:      DateTime<Utc>,
    pub sha256:          String,
    #[serde(default)]
    pub crc32:           u32,
    #[serde(default)]
    pub present_on_disk: bool,
    #[serde(default)]
    pub path:            Option<String>,
    #[serde(default)]
    pub size:            u64,
    #[serde(default)]
    pub launch:          LaunchOverrides,
}

fn default_title() -> String { DEFAULT_PACK_TITLE.to_string() }

impl ContentRecord {
    /// A record for a pack first seen at `date_added`, not yet on disk.
    pub fn new(entry_id: impl Into<String>, sha256: impl Into<String>, date_added: DateTime<Utc>) -> Self {
        Self {
            id: None,
            entry_id: entry_id.into(),
            title: default_title(),
            date_added,
            sha256: sha256.into(),
            crc32: 0,
            present_on_disk: false,
            path: None,
            size: 0,
            launch: LaunchOverrides::default(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn launch(mut self, launch: LaunchOverrides) -> Self {
        self.launch = launch;
        self
    }

    pub fn is_persisted(&self) -> bool { self.id.is_some() }
}

/// A catalog entry, as far as pack installation is concerned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id:                  String,
    #[serde(default)]
    pub title:               String,
    #[serde(default)]
    pub active_data_id:      Option<RecordId>,
    #[serde(default)]
    pub active_data_on_disk: bool,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            active_data_id: None,
            active_data_on_disk: false,
        }
    }

    /// Point this entry at `record` and mirror its on-disk flag.
    pub fn activate(&mut self, record: &ContentRecord) {
        self.active_data_id = record.id;
        self.active_data_on_disk = record.present_on_disk;
    }
}
