use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use crate::core::field_parser::{self, FieldNotice};
use crate::core::{CsvAppendOperations, DirectoryAccessOperations, HeaderLabels, NeedsUserGrant, Row};
use crate::platform_layer::{
    AppEvent, FormSnapshot, MessageSeverity, PlatformCommand, PlatformEventHandler, WindowId,
};
use time::{Date, OffsetDateTime};

pub const CSV_FILE_NAME: &str = "Test.csv";

const FOLDER_PICKER_TITLE: &str = "Choose Output Folder";

const NOTIFY_SAVE_OK: &str = "File saved successfully";
const NOTIFY_SAVE_FAILED: &str = "Error saving file";
const NOTIFY_INVALID_NUMBER: &str = "Invalid input";
const NOTIFY_INVALID_CHARACTER: &str = "Invalid character input";

/// A parsed save waiting for the user to grant an output directory.
struct PendingSave {
    labels: HeaderLabels,
    row: Row,
}

/// Presenter orchestrating directory resolution and row appends per
/// [QuickRow-Core-SaveV1].
pub struct AppLogic {
    directory_access: Arc<dyn DirectoryAccessOperations>,
    csv_writer: Arc<dyn CsvAppendOperations>,
    pending_commands: VecDeque<PlatformCommand>,
    active_window: Option<WindowId>,
    pending_save: Option<PendingSave>,
}

impl AppLogic {
    /// Constructs a new presenter instance with injected dependencies.
    pub fn new(
        directory_access: Arc<dyn DirectoryAccessOperations>,
        csv_writer: Arc<dyn CsvAppendOperations>,
    ) -> Self {
        Self {
            directory_access,
            csv_writer,
            pending_commands: VecDeque::new(),
            active_window: None,
            pending_save: None,
        }
    }

    fn enqueue_command(&mut self, command: PlatformCommand) {
        self.pending_commands.push_back(command);
    }

    fn enqueue_notification(
        &mut self,
        window_id: WindowId,
        message: impl Into<String>,
        severity: MessageSeverity,
    ) {
        self.enqueue_command(PlatformCommand::ShowNotification {
            window_id,
            message: message.into(),
            severity,
        });
    }

    fn handle_save_clicked(&mut self, window_id: WindowId, form: FormSnapshot) {
        if Some(window_id) != self.active_window {
            return;
        }

        let parsed = field_parser::parse_form(&form);
        for notice in &parsed.notices {
            log::debug!("{notice}");
            let message = match notice {
                FieldNotice::InvalidNumericInput { .. } => NOTIFY_INVALID_NUMBER,
                FieldNotice::InvalidCharacterInput { .. } => NOTIFY_INVALID_CHARACTER,
            };
            self.enqueue_notification(window_id, message, MessageSeverity::Warning);
        }

        let labels = HeaderLabels {
            number1: form.number1.label,
            number2: form.number2.label,
            number3: form.number3.label,
            character: form.character.label,
        };
        let row = Row::new(
            current_date(),
            parsed.number1,
            parsed.number2,
            parsed.number3,
            parsed.character,
        );

        match self.directory_access.resolve_writable_directory() {
            Ok(dir) => self.append_to_directory(window_id, &dir, &labels, &row),
            Err(NeedsUserGrant) => {
                self.pending_save = Some(PendingSave { labels, row });
                self.enqueue_command(PlatformCommand::ShowFolderPickerDialog {
                    window_id,
                    title: FOLDER_PICKER_TITLE.to_string(),
                    initial_dir: None,
                });
            }
        }
    }

    fn handle_folder_picker_result(&mut self, window_id: WindowId, result: Option<&Path>) {
        if Some(window_id) != self.active_window {
            return;
        }

        let Some(pending) = self.pending_save.take() else {
            return;
        };

        let Some(dir) = result else {
            // Cancelled: nothing is persisted and no file is touched.
            log::info!("Folder selection cancelled, save abandoned");
            return;
        };

        // Persist the grant first so the next save resolves silently.
        if let Err(err) = self.directory_access.remember_granted_directory(dir) {
            log::warn!("Failed to persist granted directory {dir:?}: {err}");
        }

        self.append_to_directory(window_id, dir, &pending.labels, &pending.row);
    }

    fn append_to_directory(
        &mut self,
        window_id: WindowId,
        dir: &Path,
        labels: &HeaderLabels,
        row: &Row,
    ) {
        let path = match self.directory_access.locate_or_create_file(dir, CSV_FILE_NAME) {
            Ok(path) => path,
            Err(err) => {
                log::error!("Failed to locate or create '{CSV_FILE_NAME}' in {dir:?}: {err}");
                self.enqueue_notification(window_id, NOTIFY_SAVE_FAILED, MessageSeverity::Error);
                return;
            }
        };

        match self.csv_writer.append_row(&path, labels, row) {
            Ok(()) => {
                log::info!("File saved successfully");
                self.enqueue_notification(window_id, NOTIFY_SAVE_OK, MessageSeverity::Information);
            }
            Err(err) => {
                log::error!("Error saving file: {err}");
                self.enqueue_notification(window_id, NOTIFY_SAVE_FAILED, MessageSeverity::Error);
            }
        }
    }
}

impl PlatformEventHandler for AppLogic {
    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::MainWindowUISetupComplete { window_id } => {
                self.active_window = Some(window_id);
            }
            AppEvent::SaveButtonClicked { window_id, form } => {
                self.handle_save_clicked(window_id, form)
            }
            AppEvent::FolderPickerDialogCompleted { window_id, result } => {
                self.handle_folder_picker_result(window_id, result.as_deref())
            }
            AppEvent::WindowDestroyed { window_id } => {
                if Some(window_id) == self.active_window {
                    self.active_window = None;
                }
            }
        }
    }

    fn try_dequeue_command(&mut self) -> Option<PlatformCommand> {
        self.pending_commands.pop_front()
    }
}

/// Local calendar date; falls back to UTC when the local offset cannot be
/// determined (common on multithreaded Unix processes).
fn current_date() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}
