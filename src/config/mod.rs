use std::env;
use std::path::PathBuf;
use std::sync::Arc;

pub mod latency;

pub use latency::LatencyProfile;

use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};

const DEFAULT_DATA_DIR: &str = ".agora";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

pub struct Config {
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub latency: LatencyProfile,
}

impl Config {
    pub fn from_env() -> Self {
        let storage = match env::var("AGORA_STORAGE")
            .map(|v| v.trim().to_lowercase())
            .as_deref()
        {
            Ok("memory") => StorageBackend::Memory,
            Ok("file") | Err(_) => StorageBackend::File,
            Ok(other) => {
                tracing::warn!("Config: Unknown AGORA_STORAGE '{}', using file storage", other);
                StorageBackend::File
            }
        };

        let data_dir = env::var("AGORA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let simulate = env::var("AGORA_SIMULATE_LATENCY")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let latency = if simulate {
            tracing::info!("Config: Simulated backend latency enabled");
            LatencyProfile::simulated()
        } else {
            LatencyProfile::none()
        };

        Self {
            storage,
            data_dir,
            latency,
        }
    }

    /// Builds the storage medium this configuration points at.
    pub fn open_storage(&self) -> Arc<dyn KeyValueStorage> {
        match self.storage {
            StorageBackend::File => {
                tracing::debug!("Config: File storage at {}", self.data_dir.display());
                Arc::new(FileStorage::new(self.data_dir.clone()))
            }
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
