use std::error::Error;
use std::sync::Arc;

use QuickRowCsvEntry::app_logic::handler::AppLogic;
use QuickRowCsvEntry::core::{
    CoreCsvWriter, CoreDirectoryAccessManager, CoreSettingsManager, CsvAppendOperations,
    DirectoryAccessOperations, SettingsManagerOperations,
};
use QuickRowCsvEntry::gui::CsvEntryApp;

const APP_NAME: &str = "QuickRow CSV Entry";
const APP_CONFIG_NAME: &str = "QuickRowCsvEntry";

fn main() {
    if let Err(err) = run() {
        log::error!("Application error: {err}");
        eprintln!("Application error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::builder()
        .format_timestamp(None)
        .format_target(false)
        .try_init();

    log::info!("Starting {APP_NAME}");

    let settings_manager: Arc<dyn SettingsManagerOperations> = Arc::new(CoreSettingsManager::new());
    let directory_access: Arc<dyn DirectoryAccessOperations> = Arc::new(
        CoreDirectoryAccessManager::new(settings_manager, APP_CONFIG_NAME),
    );
    let csv_writer: Arc<dyn CsvAppendOperations> = Arc::new(CoreCsvWriter::new());

    let logic = AppLogic::new(directory_access, csv_writer);

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([400.0, 280.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|_| Ok(Box::new(CsvEntryApp::new(Box::new(logic))))),
    )?;

    Ok(())
}
