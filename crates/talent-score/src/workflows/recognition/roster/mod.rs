//! CSV roster import keyed by the HR database column names.

mod parser;
mod tenure;

use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use tracing::info;

use super::domain::EmployeeRecord;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingEmployeeId { row: usize },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingEmployeeId { row } => {
                write!(f, "roster row {} has no employee_id", row)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::MissingEmployeeId { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Builds unscored [`EmployeeRecord`]s from an HR export. Tenure figures are derived
/// relative to `as_of` so imports are reproducible.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        as_of: NaiveDate,
    ) -> Result<Vec<EmployeeRecord>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, as_of)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        as_of: NaiveDate,
    ) -> Result<Vec<EmployeeRecord>, RosterImportError> {
        let rows = parser::parse_rows(reader)?;
        let mut records = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            if row.employee_id.trim().is_empty() {
                // Header is line 1, so the first data row is row 2.
                return Err(RosterImportError::MissingEmployeeId { row: index + 2 });
            }
            records.push(row.into_record(as_of));
        }

        info!(employees = records.len(), %as_of, "roster imported");
        Ok(records)
    }
}
