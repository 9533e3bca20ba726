use std::time::{Duration, Instant};

use crate::platform_layer::{
    AppEvent, FieldEntry, FormSnapshot, MessageSeverity, PlatformCommand, PlatformEventHandler,
    WindowId,
};
use eframe::egui;
use rfd::FileDialog;

const LABEL_NUMBER1: &str = "Number 1";
const LABEL_NUMBER2: &str = "Number 2";
const LABEL_NUMBER3: &str = "Number 3";
const LABEL_CHARACTER: &str = "Character";

const TOAST_LIFETIME: Duration = Duration::from_millis(2500);

struct Toast {
    message: String,
    severity: MessageSeverity,
    expires_at: Instant,
}

/// Entry form frontend. Presentation glue only: captures the four raw
/// texts, forwards events to the presenter and executes its commands
/// (folder picker, transient notifications).
pub struct CsvEntryApp {
    logic: Box<dyn PlatformEventHandler>,
    window_id: WindowId,
    setup_sent: bool,
    number1: String,
    number2: String,
    number3: String,
    character: String,
    toasts: Vec<Toast>,
}

impl CsvEntryApp {
    pub fn new(logic: Box<dyn PlatformEventHandler>) -> Self {
        Self {
            logic,
            window_id: WindowId::new(1),
            setup_sent: false,
            number1: String::new(),
            number2: String::new(),
            number3: String::new(),
            character: String::new(),
            toasts: Vec::new(),
        }
    }

    fn form_snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            number1: FieldEntry::new(LABEL_NUMBER1, self.number1.as_str()),
            number2: FieldEntry::new(LABEL_NUMBER2, self.number2.as_str()),
            number3: FieldEntry::new(LABEL_NUMBER3, self.number3.as_str()),
            character: FieldEntry::new(LABEL_CHARACTER, self.character.as_str()),
        }
    }

    /// Drains the presenter's command queue. The folder picker runs
    /// synchronously here; its result is fed straight back as an event,
    /// which may enqueue further commands picked up by the same loop.
    fn pump_commands(&mut self) {
        while let Some(command) = self.logic.try_dequeue_command() {
            match command {
                PlatformCommand::ShowFolderPickerDialog {
                    window_id,
                    title,
                    initial_dir,
                } => {
                    let mut dialog = FileDialog::new().set_title(&title);
                    if let Some(dir) = initial_dir {
                        dialog = dialog.set_directory(dir);
                    }
                    let result = dialog.pick_folder();
                    self.logic
                        .handle_event(AppEvent::FolderPickerDialogCompleted { window_id, result });
                }
                PlatformCommand::ShowNotification {
                    message, severity, ..
                } => {
                    match severity {
                        MessageSeverity::Information => log::info!("{message}"),
                        MessageSeverity::Warning => log::warn!("{message}"),
                        MessageSeverity::Error => log::error!("{message}"),
                    }
                    self.toasts.push(Toast {
                        message,
                        severity,
                        expires_at: Instant::now() + TOAST_LIFETIME,
                    });
                }
            }
        }
    }

    fn draw_toasts(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        self.toasts.retain(|toast| toast.expires_at > now);

        for toast in &self.toasts {
            let color = match toast.severity {
                MessageSeverity::Information => egui::Color32::LIGHT_GREEN,
                MessageSeverity::Warning => egui::Color32::GOLD,
                MessageSeverity::Error => egui::Color32::LIGHT_RED,
            };
            ui.label(egui::RichText::new(&toast.message).color(color));
        }
    }
}

impl eframe::App for CsvEntryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.setup_sent {
            self.logic.handle_event(AppEvent::MainWindowUISetupComplete {
                window_id: self.window_id,
            });
            self.setup_sent = true;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Grid::new("entry_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(LABEL_NUMBER1);
                    ui.text_edit_singleline(&mut self.number1);
                    ui.end_row();

                    ui.label(LABEL_NUMBER2);
                    ui.text_edit_singleline(&mut self.number2);
                    ui.end_row();

                    ui.label(LABEL_NUMBER3);
                    ui.text_edit_singleline(&mut self.number3);
                    ui.end_row();

                    ui.label(LABEL_CHARACTER);
                    ui.text_edit_singleline(&mut self.character);
                    ui.end_row();
                });

            ui.separator();

            if ui.button("Save").clicked() {
                log::debug!("Save button clicked");
                let form = self.form_snapshot();
                self.logic.handle_event(AppEvent::SaveButtonClicked {
                    window_id: self.window_id,
                    form,
                });
            }

            self.pump_commands();

            ui.separator();
            self.draw_toasts(ui);
        });

        if !self.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
