//! CSV dataset loader.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::analyzer::PasswordRecord;
use crate::error::AnalysisError;

/// Default name of the column holding passwords.
pub const DEFAULT_COLUMN: &str = "password";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV file must contain a '{0}' column")]
    MissingColumn(String),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Loads passwords from the `column` column of a CSV file with a header row.
///
/// Fields are taken verbatim, in file order. Row indexes in errors are
/// zero-based and exclude the header.
///
/// # Errors
///
/// Returns error if:
/// - File cannot be opened or parsed
/// - Header has no `column`
/// - A row lacks the column or holds bytes that are not UTF-8
pub fn load_passwords<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<PasswordRecord>, LoadError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let passwords = read_passwords(reader, column)?;

    #[cfg(feature = "tracing")]
    tracing::info!("Loaded {} passwords from {:?}", passwords.len(), path);

    Ok(passwords)
}

/// Same as [`load_passwords`], reading from any byte source.
pub fn load_passwords_from_reader<R: io::Read>(source: R, column: &str) -> Result<Vec<PasswordRecord>, LoadError> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    read_passwords(reader, column)
}

fn read_passwords<R: io::Read>(mut reader: csv::Reader<R>, column: &str) -> Result<Vec<PasswordRecord>, LoadError> {
    let position = reader
        .byte_headers()?
        .iter()
        .position(|header| header == column.as_bytes())
        .ok_or_else(|| LoadError::MissingColumn(column.to_string()))?;

    let mut passwords = Vec::new();
    for (index, record) in reader.byte_records().enumerate() {
        let record = record?;
        let field = record
            .get(position)
            .ok_or_else(|| AnalysisError::invalid_input(index, format!("missing '{}' field", column)))?;
        passwords.push(PasswordRecord::from_bytes(index, field.to_vec())?);
    }
    Ok(passwords)
}
