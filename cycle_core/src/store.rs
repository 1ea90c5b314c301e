//! Cycle profile persistence with file locking.
//!
//! The profile lives in a single JSON document:
//! `{"cycles": [{"start": "2024-01-01", "end": "2024-01-05"}], "avg_cycle": 28}`.
//! Every mutation rewrites the whole file.

use crate::{CycleProfile, Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl CycleProfile {
    /// Load a profile from a file with shared locking
    ///
    /// Returns an empty profile if the file doesn't exist. Unreadable or
    /// malformed files are reported as errors so a later save cannot
    /// overwrite recorded history with an empty one.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No profile found at {:?}, starting empty", path);
            return Ok(Self::default());
        }

        let file = File::open(path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            return Err(Error::Io(e));
        }

        file.unlock()?;

        let mut profile = match serde_json::from_str::<CycleProfile>(&contents) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Failed to parse profile {:?}: {}", path, e);
                return Err(Error::Json(e));
            }
        };

        profile.history.sort_by_key(|c| c.start);

        tracing::debug!(
            "Loaded {} cycles from {:?}",
            profile.history.len(),
            path
        );
        Ok(profile)
    }

    /// Save the profile to a file with exclusive locking
    ///
    /// Atomically writes the profile by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "profile path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace old profile
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} cycles to {:?}", self.history.len(), path);
        Ok(())
    }

    /// Load the profile, derive a new one from it, and save the result
    ///
    /// Nothing is written when `f` fails.
    pub fn update<F, E>(path: &Path, f: F) -> std::result::Result<Self, E>
    where
        F: FnOnce(&CycleProfile) -> std::result::Result<CycleProfile, E>,
        E: From<Error>,
    {
        let current = Self::load(path)?;
        let next = f(&current)?;
        next.save(path)?;
        Ok(next)
    }
}
