#[cfg(test)]
mod tests {
    use crate::app_logic::handler::{AppLogic, CSV_FILE_NAME};
    use crate::core::{
        CsvAppendError, CsvAppendOperations, DirectoryAccessOperations, HeaderLabels,
        NeedsUserGrant, Row,
    };
    use crate::platform_layer::{
        AppEvent, FieldEntry, FormSnapshot, MessageSeverity, PlatformCommand,
        PlatformEventHandler, WindowId,
    };
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    struct MockDirectoryAccess {
        resolved_directory: Mutex<Option<PathBuf>>,
        remembered: Mutex<Vec<PathBuf>>,
        locate_calls: Mutex<Vec<(PathBuf, String)>>,
        fail_locate: bool,
    }

    impl MockDirectoryAccess {
        fn with_grant(dir: &Path) -> Self {
            Self {
                resolved_directory: Mutex::new(Some(dir.to_path_buf())),
                remembered: Mutex::new(Vec::new()),
                locate_calls: Mutex::new(Vec::new()),
                fail_locate: false,
            }
        }

        fn without_grant() -> Self {
            Self {
                resolved_directory: Mutex::new(None),
                remembered: Mutex::new(Vec::new()),
                locate_calls: Mutex::new(Vec::new()),
                fail_locate: false,
            }
        }

        fn with_failing_locate(dir: &Path) -> Self {
            Self {
                resolved_directory: Mutex::new(Some(dir.to_path_buf())),
                remembered: Mutex::new(Vec::new()),
                locate_calls: Mutex::new(Vec::new()),
                fail_locate: true,
            }
        }

        fn remembered(&self) -> Vec<PathBuf> {
            self.remembered.lock().unwrap().clone()
        }

        fn locate_calls(&self) -> Vec<(PathBuf, String)> {
            self.locate_calls.lock().unwrap().clone()
        }
    }

    impl DirectoryAccessOperations for MockDirectoryAccess {
        fn resolve_writable_directory(&self) -> Result<PathBuf, NeedsUserGrant> {
            self.resolved_directory
                .lock()
                .unwrap()
                .clone()
                .ok_or(NeedsUserGrant)
        }

        fn remember_granted_directory(&self, dir: &Path) -> Result<(), io::Error> {
            self.remembered.lock().unwrap().push(dir.to_path_buf());
            *self.resolved_directory.lock().unwrap() = Some(dir.to_path_buf());
            Ok(())
        }

        fn locate_or_create_file(&self, dir: &Path, file_name: &str) -> Result<PathBuf, io::Error> {
            self.locate_calls
                .lock()
                .unwrap()
                .push((dir.to_path_buf(), file_name.to_string()));
            if self.fail_locate {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "refused"));
            }
            Ok(dir.join(file_name))
        }
    }

    #[derive(Default)]
    struct MockCsvWriter {
        calls: Mutex<Vec<(PathBuf, HeaderLabels, Row)>>,
        fail_append: bool,
    }

    impl MockCsvWriter {
        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_append: true,
            }
        }

        fn calls(&self) -> Vec<(PathBuf, HeaderLabels, Row)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CsvAppendOperations for MockCsvWriter {
        fn append_row(
            &self,
            path: &Path,
            labels: &HeaderLabels,
            row: &Row,
        ) -> Result<(), CsvAppendError> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_path_buf(), labels.clone(), row.clone()));
            if self.fail_append {
                return Err(CsvAppendError::OpenForWrite {
                    path: path.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "refused"),
                });
            }
            Ok(())
        }
    }

    fn form(n1: &str, n2: &str, n3: &str, ch: &str) -> FormSnapshot {
        FormSnapshot {
            number1: FieldEntry::new("Number 1", n1),
            number2: FieldEntry::new("Number 2", n2),
            number3: FieldEntry::new("Number 3", n3),
            character: FieldEntry::new("Character", ch),
        }
    }

    fn logic_with(
        directory_access: Arc<MockDirectoryAccess>,
        csv_writer: Arc<MockCsvWriter>,
    ) -> (AppLogic, WindowId) {
        let mut app_logic = AppLogic::new(directory_access, csv_writer);
        let window_id = WindowId::new(7);
        app_logic.handle_event(AppEvent::MainWindowUISetupComplete { window_id });
        (app_logic, window_id)
    }

    fn expect_notification(
        app_logic: &mut AppLogic,
        expected_message: &str,
        expected_severity: MessageSeverity,
    ) {
        let command = app_logic
            .try_dequeue_command()
            .expect("expected a notification command");
        match command {
            PlatformCommand::ShowNotification {
                message, severity, ..
            } => {
                assert_eq!(message, expected_message);
                assert_eq!(severity, expected_severity);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn save_with_known_directory_appends_and_notifies_success() {
        // Arrange
        let output_dir = PathBuf::from("/tmp/quickrow-out");
        let directory_access = Arc::new(MockDirectoryAccess::with_grant(&output_dir));
        let csv_writer = Arc::new(MockCsvWriter::default());
        let (mut app_logic, window_id) = logic_with(directory_access.clone(), csv_writer.clone());

        // Act
        app_logic.handle_event(AppEvent::SaveButtonClicked {
            window_id,
            form: form("5", "12", "3", "A"),
        });

        // Assert
        expect_notification(&mut app_logic, "File saved successfully", MessageSeverity::Information);
        assert!(
            app_logic.try_dequeue_command().is_none(),
            "no extra commands expected"
        );

        let locate_calls = directory_access.locate_calls();
        assert_eq!(locate_calls.len(), 1);
        assert_eq!(locate_calls[0].0, output_dir);
        assert_eq!(locate_calls[0].1, CSV_FILE_NAME);

        let writer_calls = csv_writer.calls();
        assert_eq!(writer_calls.len(), 1);
        let (path, labels, row) = &writer_calls[0];
        assert_eq!(path, &output_dir.join(CSV_FILE_NAME));
        assert_eq!(labels.number2, "Number 2");
        assert_eq!((row.number1, row.number2, row.number3), (5, 12, 3));
        assert_eq!(row.character, 'A');
    }

    #[test]
    fn save_without_grant_prompts_then_appends_the_pending_row() {
        // Arrange
        let directory_access = Arc::new(MockDirectoryAccess::without_grant());
        let csv_writer = Arc::new(MockCsvWriter::default());
        let (mut app_logic, window_id) = logic_with(directory_access.clone(), csv_writer.clone());

        // Act: save has no directory to use yet
        app_logic.handle_event(AppEvent::SaveButtonClicked {
            window_id,
            form: form("7", "8", "9", "Q"),
        });

        let picker = app_logic
            .try_dequeue_command()
            .expect("expected folder picker command");
        match picker {
            PlatformCommand::ShowFolderPickerDialog { title, .. } => {
                assert!(
                    title.contains("Output"),
                    "expected output folder title, got {title}"
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(
            csv_writer.calls().is_empty(),
            "no write may happen before the grant"
        );

        // Act: the user picks a folder
        let chosen = PathBuf::from("/tmp/quickrow-granted");
        app_logic.handle_event(AppEvent::FolderPickerDialogCompleted {
            window_id,
            result: Some(chosen.clone()),
        });

        // Assert: grant persisted before the append, row carried over intact
        assert_eq!(directory_access.remembered(), vec![chosen.clone()]);
        expect_notification(&mut app_logic, "File saved successfully", MessageSeverity::Information);

        let writer_calls = csv_writer.calls();
        assert_eq!(writer_calls.len(), 1);
        let (path, _, row) = &writer_calls[0];
        assert_eq!(path, &chosen.join(CSV_FILE_NAME));
        assert_eq!((row.number1, row.number2, row.number3), (7, 8, 9));
        assert_eq!(row.character, 'Q');
    }

    #[test]
    fn cancelled_folder_picker_abandons_the_save() {
        // Arrange
        let directory_access = Arc::new(MockDirectoryAccess::without_grant());
        let csv_writer = Arc::new(MockCsvWriter::default());
        let (mut app_logic, window_id) = logic_with(directory_access.clone(), csv_writer.clone());

        app_logic.handle_event(AppEvent::SaveButtonClicked {
            window_id,
            form: form("1", "2", "3", "A"),
        });
        let _picker = app_logic.try_dequeue_command().expect("picker command");

        // Act
        app_logic.handle_event(AppEvent::FolderPickerDialogCompleted {
            window_id,
            result: None,
        });

        // Assert: nothing persisted, nothing written, no notification
        assert!(directory_access.remembered().is_empty());
        assert!(csv_writer.calls().is_empty());
        assert!(app_logic.try_dequeue_command().is_none());

        // A later save starts over with a fresh prompt.
        app_logic.handle_event(AppEvent::SaveButtonClicked {
            window_id,
            form: form("1", "2", "3", "A"),
        });
        match app_logic.try_dequeue_command() {
            Some(PlatformCommand::ShowFolderPickerDialog { .. }) => {}
            other => panic!("expected a second picker prompt, got {other:?}"),
        }
    }

    #[test]
    fn invalid_numeric_inputs_substitute_zero_and_warn_per_field() {
        // Arrange
        let output_dir = PathBuf::from("/tmp/quickrow-out");
        let directory_access = Arc::new(MockDirectoryAccess::with_grant(&output_dir));
        let csv_writer = Arc::new(MockCsvWriter::default());
        let (mut app_logic, window_id) = logic_with(directory_access, csv_writer.clone());

        // Act: two of the three numbers are unusable
        app_logic.handle_event(AppEvent::SaveButtonClicked {
            window_id,
            form: form("abc", "", "7", "Z"),
        });

        // Assert: one warning per bad field, then the save proceeds
        expect_notification(&mut app_logic, "Invalid input", MessageSeverity::Warning);
        expect_notification(&mut app_logic, "Invalid input", MessageSeverity::Warning);
        expect_notification(&mut app_logic, "File saved successfully", MessageSeverity::Information);
        assert!(app_logic.try_dequeue_command().is_none());

        let writer_calls = csv_writer.calls();
        assert_eq!(writer_calls.len(), 1);
        let (_, _, row) = &writer_calls[0];
        assert_eq!((row.number1, row.number2, row.number3), (0, 0, 7));
        assert_eq!(row.character, 'Z');
    }

    #[test]
    fn invalid_character_input_substitutes_space_and_warns_once() {
        // Arrange
        let output_dir = PathBuf::from("/tmp/quickrow-out");
        let directory_access = Arc::new(MockDirectoryAccess::with_grant(&output_dir));
        let csv_writer = Arc::new(MockCsvWriter::default());
        let (mut app_logic, window_id) = logic_with(directory_access, csv_writer.clone());

        // Act
        app_logic.handle_event(AppEvent::SaveButtonClicked {
            window_id,
            form: form("1", "2", "3", "ab"),
        });

        // Assert
        expect_notification(&mut app_logic, "Invalid character input", MessageSeverity::Warning);
        expect_notification(&mut app_logic, "File saved successfully", MessageSeverity::Information);
        assert!(app_logic.try_dequeue_command().is_none());

        let writer_calls = csv_writer.calls();
        assert_eq!(writer_calls.len(), 1);
        assert_eq!(writer_calls[0].2.character, ' ');
    }

    #[test]
    fn append_failure_reduces_to_a_generic_error_notification() {
        // Arrange
        let output_dir = PathBuf::from("/tmp/quickrow-out");
        let directory_access = Arc::new(MockDirectoryAccess::with_grant(&output_dir));
        let csv_writer = Arc::new(MockCsvWriter::failing());
        let (mut app_logic, window_id) = logic_with(directory_access, csv_writer);

        // Act
        app_logic.handle_event(AppEvent::SaveButtonClicked {
            window_id,
            form: form("1", "2", "3", "A"),
        });

        // Assert
        expect_notification(&mut app_logic, "Error saving file", MessageSeverity::Error);
        assert!(app_logic.try_dequeue_command().is_none());
    }

    #[test]
    fn locate_or_create_failure_reduces_to_a_generic_error_notification() {
        // Arrange
        let output_dir = PathBuf::from("/tmp/quickrow-out");
        let directory_access = Arc::new(MockDirectoryAccess::with_failing_locate(&output_dir));
        let csv_writer = Arc::new(MockCsvWriter::default());
        let (mut app_logic, window_id) = logic_with(directory_access, csv_writer.clone());

        // Act
        app_logic.handle_event(AppEvent::SaveButtonClicked {
            window_id,
            form: form("1", "2", "3", "A"),
        });

        // Assert
        expect_notification(&mut app_logic, "Error saving file", MessageSeverity::Error);
        assert!(csv_writer.calls().is_empty());
    }

    #[test]
    fn events_before_window_setup_are_ignored() {
        // Arrange: no MainWindowUISetupComplete
        let directory_access = Arc::new(MockDirectoryAccess::without_grant());
        let csv_writer = Arc::new(MockCsvWriter::default());
        let mut app_logic = AppLogic::new(directory_access, csv_writer.clone());

        // Act
        app_logic.handle_event(AppEvent::SaveButtonClicked {
            window_id: WindowId::new(7),
            form: form("1", "2", "3", "A"),
        });

        // Assert
        assert!(app_logic.try_dequeue_command().is_none());
        assert!(csv_writer.calls().is_empty());
    }
}
