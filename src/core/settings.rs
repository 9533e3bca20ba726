use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Snapshot of persisted fields between sessions per [QuickRow-Tech-SettingsPersistenceV1].
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AppSettings {
    #[serde(default)]
    output_directory: Option<PathBuf>,
}

impl AppSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_directory(output_directory: Option<PathBuf>) -> Self {
        Self { output_directory }
    }

    pub fn output_directory(&self) -> Option<&PathBuf> {
        self.output_directory.as_ref()
    }

    pub fn set_output_directory(&mut self, dir: &Path) {
        self.output_directory = Some(dir.to_path_buf());
    }
}
