//! Bulk universe CSV import and export.
//!
//! Row-level parse failures are collected while parsing continues, so one
//! bad date does not discard a whole file. Chronological ordering of
//! temporal imports is enforced by an explicit sort on parse, never by CSV
//! row order.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ImportError;
use crate::turnover::symbol_deltas;
use crate::universes::{AssetComposition, UniverseSnapshot};

use super::{detect_format, CsvImportFormat};

const TEMPORAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// A dateless universe parsed from the static shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UniverseDefinition {
    pub name: String,
    pub symbols: Vec<String>,
}

/// A universe with its full snapshot history, parsed from the temporal
/// shape. Snapshots are chronological with deltas precomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UniverseHistory {
    pub name: String,
    pub snapshots: Vec<UniverseSnapshot>,
}

/// Parsed universes, shaped by the detected format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "format", content = "universes")]
pub enum ImportedUniverses {
    Static(Vec<UniverseDefinition>),
    Temporal(Vec<UniverseHistory>),
}

/// A non-fatal problem on one row; parsing continued past it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    /// 1-based data row index (header excluded).
    pub row_index: usize,
    pub message: String,
}

/// Result of parsing a universe CSV file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CsvImportResult {
    pub detected_format: CsvImportFormat,
    pub universes: ImportedUniverses,
    pub errors: Vec<ImportRowError>,
    /// Total data rows read, including rows that errored.
    pub row_count: usize,
}

struct TemporalRow {
    row_index: usize,
    date: NaiveDate,
    symbols: Vec<String>,
    reason: Option<String>,
}

/// Parses a universe CSV in either accepted shape.
///
/// Fatal errors (`EmptyFile`, `UnrecognizedHeader`, duplicate snapshot
/// dates) fail the whole import; malformed individual rows are reported in
/// the result and skipped.
pub fn parse_universes_csv(content: &str) -> Result<CsvImportResult, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ImportError::EmptyFile);
    }
    let format = detect_format(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push(record);
    }
    if rows.is_empty() {
        return Err(ImportError::EmptyFile);
    }
    let row_count = rows.len();
    debug!("Importing {} universe rows ({:?} shape)", row_count, format);

    let mut errors = Vec::new();
    let universes = match format {
        CsvImportFormat::Static => {
            ImportedUniverses::Static(parse_static_rows(&rows, &mut errors))
        }
        CsvImportFormat::Temporal => {
            ImportedUniverses::Temporal(parse_temporal_rows(&rows, &mut errors)?)
        }
    };

    Ok(CsvImportResult {
        detected_format: format,
        universes,
        errors,
        row_count,
    })
}

fn parse_static_rows(
    rows: &[csv::StringRecord],
    errors: &mut Vec<ImportRowError>,
) -> Vec<UniverseDefinition> {
    let mut universes = Vec::new();
    for (index, record) in rows.iter().enumerate() {
        let row_index = index + 1;
        let name = record.get(0).unwrap_or_default().trim();
        if name.is_empty() {
            errors.push(ImportRowError {
                row_index,
                message: "Missing universe name".to_string(),
            });
            continue;
        }

        let mut seen = HashSet::new();
        let symbols: Vec<String> = record
            .iter()
            .skip(1)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_uppercase()))
            .map(|s| s.to_string())
            .collect();

        universes.push(UniverseDefinition {
            name: name.to_string(),
            symbols,
        });
    }
    universes
}

fn parse_temporal_rows(
    rows: &[csv::StringRecord],
    errors: &mut Vec<ImportRowError>,
) -> Result<Vec<UniverseHistory>, ImportError> {
    // Grouped by universe name, first-seen order preserved.
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<TemporalRow>> = HashMap::new();

    for (index, record) in rows.iter().enumerate() {
        let row_index = index + 1;
        let name = record.get(0).unwrap_or_default().trim();
        if name.is_empty() {
            errors.push(ImportRowError {
                row_index,
                message: "Missing universe name".to_string(),
            });
            continue;
        }
        let date_field = record.get(1).unwrap_or_default().trim();
        let date = match NaiveDate::parse_from_str(date_field, TEMPORAL_DATE_FORMAT) {
            Ok(date) => date,
            Err(err) => {
                errors.push(ImportRowError {
                    row_index,
                    message: format!("Invalid snapshot date '{}': {}", date_field, err),
                });
                continue;
            }
        };

        // Last column is reserved for the free-text change reason. Rows
        // shorter than three fields have neither symbols nor a reason.
        let field_count = record.len();
        let reason = if field_count >= 3 {
            record
                .get(field_count - 1)
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(|r| r.to_string())
        } else {
            None
        };
        let mut seen = HashSet::new();
        let symbols: Vec<String> = (2..field_count.saturating_sub(1))
            .filter_map(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_uppercase()))
            .map(|s| s.to_string())
            .collect();

        if !grouped.contains_key(name) {
            order.push(name.to_string());
        }
        grouped.entry(name.to_string()).or_default().push(TemporalRow {
            row_index,
            date,
            symbols,
            reason,
        });
    }

    let mut histories = Vec::with_capacity(order.len());
    for name in order {
        let mut group = grouped.remove(&name).unwrap_or_default();
        // Chronological order comes from this sort, not from row order.
        group.sort_by_key(|row| row.date);
        for pair in group.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(ImportError::DuplicateSnapshotDate {
                    universe: name,
                    date: pair[0].date,
                });
            }
        }
        histories.push(build_history(name, &group));
    }
    Ok(histories)
}

/// Materializes snapshots from chronologically sorted rows, computing
/// per-snapshot deltas and stamping the row's change reason onto the assets
/// it added.
fn build_history(name: String, rows: &[TemporalRow]) -> UniverseHistory {
    let mut snapshots: Vec<UniverseSnapshot> = Vec::with_capacity(rows.len());

    for row in rows {
        let assets: Vec<AssetComposition> = row
            .symbols
            .iter()
            .map(AssetComposition::from_symbol)
            .collect();
        let mut snapshot = UniverseSnapshot {
            id: Uuid::new_v4().to_string(),
            universe_id: name.clone(),
            snapshot_date: row.date,
            assets,
            turnover_rate: None,
            assets_added: None,
            assets_removed: None,
        };

        if let Some(prior) = snapshots.last() {
            let (added, removed) = symbol_deltas(prior, &snapshot);
            snapshot.turnover_rate = if prior.assets.is_empty() {
                warn!(
                    "Universe '{}' row {}: empty baseline snapshot, turnover omitted",
                    name, row.row_index
                );
                None
            } else {
                let changes = Decimal::from((added.len() + removed.len()) as u64);
                let sizes = prior.assets.len() + snapshot.assets.len();
                Some(changes / Decimal::from(sizes as u64))
            };
            if let Some(reason) = &row.reason {
                for asset in snapshot
                    .assets
                    .iter_mut()
                    .filter(|a| added.contains(&a.symbol))
                {
                    asset.reason_added = Some(reason.clone());
                }
            }
            snapshot.assets_added = Some(added);
            snapshot.assets_removed = Some(removed);
        }

        snapshots.push(snapshot);
    }

    UniverseHistory { name, snapshots }
}

/// Exports universes as `Universe Name,Symbols` with a comma-joined symbol
/// list, one row per universe.
pub fn export_universes_csv(universes: &[UniverseDefinition]) -> Result<String, ImportError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(["Universe Name", "Symbols"])?;
    for universe in universes {
        writer.write_record([universe.name.as_str(), universe.symbols.join(",").as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::Csv(e.to_string()))
}
