pub mod csv_writer;
pub mod directory_access;
pub mod field_parser;
pub mod settings;
pub mod settings_manager;

pub use csv_writer::{CoreCsvWriter, CsvAppendError, CsvAppendOperations, HeaderLabels, Row};
pub use directory_access::{
    CoreDirectoryAccessManager, DirectoryAccessOperations, NeedsUserGrant,
};
pub use field_parser::{FieldNotice, ParsedFields};
pub use settings::AppSettings;
pub use settings_manager::{CoreSettingsManager, SettingsManagerOperations};
