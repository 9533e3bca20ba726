use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use time::Date;

/// The amount column is not user input; the form only collects the three
/// numbers and the character.
const PLACEHOLDER_AMOUNT: f64 = 789.01;

/// Column labels for the header row, taken from the live form at save time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLabels {
    pub number1: String,
    pub number2: String,
    pub number3: String,
    pub character: String,
}

impl HeaderLabels {
    fn to_header_line(&self) -> String {
        format!(
            "Date,{},{},{},{}",
            self.number1, self.number2, self.number3, self.character
        )
    }
}

/// One data record: calendar date, three integers, one character and the
/// fixed amount, serialized as a single comma-separated line.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub date: Date,
    pub number1: i32,
    pub number2: i32,
    pub number3: i32,
    pub character: char,
    amount: f64,
}

impl Row {
    pub fn new(date: Date, number1: i32, number2: i32, number3: i32, character: char) -> Self {
        Self {
            date,
            number1,
            number2,
            number3,
            character,
            amount: PLACEHOLDER_AMOUNT,
        }
    }

    /// Renders the five value fields behind the date; the amount always
    /// carries two fractional digits.
    fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{:.2}",
            self.date, self.number1, self.number2, self.number3, self.character, self.amount
        )
    }
}

#[derive(Debug)]
pub enum CsvAppendError {
    OpenForWrite { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    Flush { path: PathBuf, source: io::Error },
}

impl fmt::Display for CsvAppendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvAppendError::OpenForWrite { path, source } => {
                write!(f, "could not open '{}' for writing: {source}", path.display())
            }
            CsvAppendError::Write { path, source } => {
                write!(f, "failed writing to '{}': {source}", path.display())
            }
            CsvAppendError::Flush { path, source } => {
                write!(f, "failed flushing '{}': {source}", path.display())
            }
        }
    }
}

impl Error for CsvAppendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CsvAppendError::OpenForWrite { source, .. }
            | CsvAppendError::Write { source, .. }
            | CsvAppendError::Flush { source, .. } => Some(source),
        }
    }
}

/// Appends one row to a CSV document per [QuickRow-Core-AppendV1].
pub trait CsvAppendOperations: Send + Sync {
    fn append_row(&self, path: &Path, labels: &HeaderLabels, row: &Row)
    -> Result<(), CsvAppendError>;
}

pub struct CoreCsvWriter;

impl CoreCsvWriter {
    pub fn new() -> Self {
        Self
    }
}

impl CsvAppendOperations for CoreCsvWriter {
    /// Read-modify-rewrite cycle: the whole previous content is read back,
    /// the new line (and a header, when the file held no lines) is appended
    /// to the buffer, and the file is rewritten in truncate mode. Bounds the
    /// practical file size but needs no seek/append support from storage.
    fn append_row(
        &self,
        path: &Path,
        labels: &HeaderLabels,
        row: &Row,
    ) -> Result<(), CsvAppendError> {
        let mut buffer = String::new();
        let mut any_line_read = false;

        // A file that cannot be opened or read is treated as new; losing
        // header detection must never block the append.
        match File::open(path) {
            Ok(file) => {
                for line in BufReader::new(file).lines() {
                    match line {
                        Ok(text) => {
                            buffer.push_str(&text);
                            buffer.push('\n');
                            any_line_read = true;
                        }
                        Err(err) => {
                            log::debug!("Error reading '{}': {err}", path.display());
                            break;
                        }
                    }
                }
            }
            Err(err) => {
                log::debug!("Error opening '{}' for read: {err}", path.display());
            }
        }

        if !any_line_read {
            buffer.push_str(&labels.to_header_line());
            buffer.push('\n');
        }

        buffer.push_str(&row.to_csv_line());
        buffer.push('\n');

        let file = File::create(path).map_err(|source| CsvAppendError::OpenForWrite {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(buffer.as_bytes())
            .map_err(|source| CsvAppendError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        writer.flush().map_err(|source| CsvAppendError::Flush {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Appended one row to '{}'", path.display());
        Ok(())
    }
}
