use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::FloorConfig;
use crate::floorgen::{Floor, Game, format_fingerprint};

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io failed: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SnapshotPayload {
    Floor(Floor),
    Game(Game),
}

impl SnapshotPayload {
    pub fn floor(&self) -> &Floor {
        match self {
            Self::Floor(floor) => floor,
            Self::Game(game) => &game.floor,
        }
    }
}

/// Assembled floor or game written to disk together with the inputs that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub format_version: u32,
    pub seed: u64,
    pub config: FloorConfig,
    pub fingerprint_hex: String,
    pub payload: SnapshotPayload,
}

impl Snapshot {
    pub fn new(seed: u64, config: FloorConfig, payload: SnapshotPayload) -> Self {
        let fingerprint_hex = format_fingerprint(payload.floor().fingerprint());
        Self { format_version: SNAPSHOT_FORMAT_VERSION, seed, config, fingerprint_hex, payload }
    }

    /// True when the stored fingerprint still matches the stored floor.
    pub fn fingerprint_matches(&self) -> bool {
        self.fingerprint_hex == format_fingerprint(self.payload.floor().fingerprint())
    }

    pub fn write_atomic(&self, path: &Path) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&content)?;
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.format_version,
                expected: SNAPSHOT_FORMAT_VERSION,
            });
        }
        Ok(snapshot)
    }
}
