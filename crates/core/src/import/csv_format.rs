//! Header-shape detection for bulk universe CSV imports.

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::errors::ImportError;

/// The two accepted CSV shapes, detected by header inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CsvImportFormat {
    /// `Universe Name, Symbol1, Symbol2, ...` - one symbol list per row.
    Static,
    /// `Universe Name, Snapshot Date, Symbol1..SymbolN, Change Reason` -
    /// dated rows, last column reserved for a free-text reason.
    Temporal,
}

const UNIVERSE_NAME_HEADER: &str = "universe name";
const SNAPSHOT_DATE_HEADER: &str = "snapshot date";

fn normalized(field: Option<&str>) -> String {
    field.unwrap_or_default().trim().to_lowercase()
}

/// Inspects the header row and picks the import shape.
pub fn detect_format(headers: &StringRecord) -> Result<CsvImportFormat, ImportError> {
    if normalized(headers.get(0)) != UNIVERSE_NAME_HEADER {
        return Err(ImportError::UnrecognizedHeader(
            headers.iter().collect::<Vec<_>>().join(", "),
        ));
    }
    if normalized(headers.get(1)) == SNAPSHOT_DATE_HEADER {
        Ok(CsvImportFormat::Temporal)
    } else {
        Ok(CsvImportFormat::Static)
    }
}
