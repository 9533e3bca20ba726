use std::path::PathBuf;

/// Identifies a top-level window across the platform boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u32);

impl WindowId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Information,
    Warning,
    Error,
}

/// One labeled entry field as the form presented it at save time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldEntry {
    pub label: String,
    pub text: String,
}

impl FieldEntry {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Raw form state captured when the user presses Save. The labels feed the
/// CSV header row; the texts feed field parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    pub number1: FieldEntry,
    pub number2: FieldEntry,
    pub number3: FieldEntry,
    pub character: FieldEntry,
}

/// Events flowing from the platform frontend into the application logic.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    MainWindowUISetupComplete {
        window_id: WindowId,
    },
    SaveButtonClicked {
        window_id: WindowId,
        form: FormSnapshot,
    },
    /// Result of a previously requested folder picker. `None` means the
    /// user cancelled the dialog.
    FolderPickerDialogCompleted {
        window_id: WindowId,
        result: Option<PathBuf>,
    },
    WindowDestroyed {
        window_id: WindowId,
    },
}

/// Commands flowing from the application logic back to the platform frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCommand {
    ShowFolderPickerDialog {
        window_id: WindowId,
        title: String,
        initial_dir: Option<PathBuf>,
    },
    ShowNotification {
        window_id: WindowId,
        message: String,
        severity: MessageSeverity,
    },
}

/// Implemented by the presenter; the frontend feeds events in and drains
/// the resulting commands after each event batch.
pub trait PlatformEventHandler: Send {
    fn handle_event(&mut self, event: AppEvent);
    fn try_dequeue_command(&mut self) -> Option<PlatformCommand>;
}
