//! TTL-bound JSON cache on local disk.
//!
//! Each entry lives in its own `<key>.json` file wrapping the payload in
//! an envelope with its write timestamp. Reads past the TTL delete the
//! entry and report a miss, as do unreadable entries; a miss is never an
//! error.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use dojade_transit::time::{Clock, SystemClock};

/// Cached reference data goes stale after a day.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Cache encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;

/// Payload plus the instant it was written, unix milliseconds.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    data: T,
    timestamp: i64,
}

pub struct CacheStore {
    dir: PathBuf,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    /// Opens the cache directory, creating it if needed.
    pub fn new(dir: PathBuf, ttl: Duration) -> Result<Self> {
        Self::with_clock(dir, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(dir: PathBuf, ttl: Duration, clock: Arc<dyn Clock>) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, ttl, clock })
    }

    /// Write a value under `key`, stamped with the current time.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let envelope = Envelope {
            data: value,
            timestamp: self.clock.now_utc().timestamp_millis(),
        };
        let encoded = serde_json::to_vec(&envelope)?;
        std::fs::write(self.entry_path(key), encoded)?;
        Ok(())
    }

    /// Read a fresh value under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.entry_path(key);
        let raw = std::fs::read(&path).ok()?;
        let envelope: Envelope<T> = match serde_json::from_slice(&raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::debug!("evicting unreadable cache entry {key}: {err}");
                let _ = std::fs::remove_file(&path);
                return None;
            }
        };

        let age_ms = self.clock.now_utc().timestamp_millis() - envelope.timestamp;
        if age_ms > self.ttl.as_millis() as i64 {
            tracing::debug!("evicting stale cache entry {key}");
            let _ = std::fs::remove_file(&path);
            return None;
        }
        Some(envelope.data)
    }

    /// Whether a fresh entry exists under `key`.
    pub fn has(&self, key: &str) -> bool {
        self.get::<serde_json::Value>(key).is_some()
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Drop every entry in the cache directory.
    pub fn clear(&self) -> Result<()> {
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

/// Keys become file names; anything outside `[A-Za-z0-9_-]` is replaced.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
