use crate::core::settings_manager::SettingsManagerOperations;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const WRITE_PROBE_FILENAME: &str = ".quickrow-write-probe";

/// No usable output directory is on record; an interactive folder grant
/// is required before the save can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeedsUserGrant;

/// Resolves, records and probes the user-granted output directory per
/// [QuickRow-Core-DirectoryAccessV1].
pub trait DirectoryAccessOperations: Send + Sync {
    /// Re-validates the persisted directory on every call: the identifier
    /// must still resolve to a directory the process can write to.
    fn resolve_writable_directory(&self) -> Result<PathBuf, NeedsUserGrant>;

    /// Persists a freshly granted directory so later resolutions succeed
    /// without re-prompting.
    fn remember_granted_directory(&self, dir: &Path) -> Result<(), io::Error>;

    /// Returns the named file under `dir`, creating it empty when absent.
    fn locate_or_create_file(&self, dir: &Path, file_name: &str) -> Result<PathBuf, io::Error>;
}

pub struct CoreDirectoryAccessManager {
    settings_manager: Arc<dyn SettingsManagerOperations>,
    app_name: String,
}

impl CoreDirectoryAccessManager {
    pub fn new(
        settings_manager: Arc<dyn SettingsManagerOperations>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            settings_manager,
            app_name: app_name.into(),
        }
    }

    /// Metadata flags lie on some filesystems, so write capability is
    /// checked by actually creating (and removing) a probe file.
    fn verify_writable(dir: &Path) -> bool {
        let probe = dir.join(WRITE_PROBE_FILENAME);
        match OpenOptions::new().create(true).write(true).open(&probe) {
            Ok(_) => {
                if let Err(err) = fs::remove_file(&probe) {
                    log::warn!("Failed to remove write probe {probe:?}: {err}");
                }
                true
            }
            Err(err) => {
                log::info!("Directory {dir:?} failed the write probe: {err}");
                false
            }
        }
    }
}

impl DirectoryAccessOperations for CoreDirectoryAccessManager {
    fn resolve_writable_directory(&self) -> Result<PathBuf, NeedsUserGrant> {
        let settings = match self.settings_manager.load_settings(&self.app_name) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Failed to load settings: {err}");
                return Err(NeedsUserGrant);
            }
        };

        let Some(dir) = settings.output_directory() else {
            log::info!("No output directory on record yet");
            return Err(NeedsUserGrant);
        };

        if !dir.is_dir() {
            log::info!("Recorded output directory {dir:?} no longer resolves");
            return Err(NeedsUserGrant);
        }

        if !Self::verify_writable(dir) {
            return Err(NeedsUserGrant);
        }

        Ok(dir.clone())
    }

    fn remember_granted_directory(&self, dir: &Path) -> Result<(), io::Error> {
        let mut settings = self
            .settings_manager
            .load_settings(&self.app_name)
            .unwrap_or_default();
        settings.set_output_directory(dir);
        self.settings_manager.save_settings(&self.app_name, &settings)?;
        log::info!("Recorded output directory {dir:?}");
        Ok(())
    }

    fn locate_or_create_file(&self, dir: &Path, file_name: &str) -> Result<PathBuf, io::Error> {
        let path = dir.join(file_name);
        if path.is_file() {
            return Ok(path);
        }

        OpenOptions::new().write(true).create_new(true).open(&path)?;
        log::info!("Created '{}'", path.display());
        Ok(path)
    }
}
