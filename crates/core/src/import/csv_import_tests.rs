//! Tests for bulk universe CSV import/export.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::errors::ImportError;
    use crate::import::{
        export_universes_csv, parse_universes_csv, CsvImportFormat, ImportedUniverses,
        UniverseDefinition,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== format detection ====================

    #[test]
    fn test_detects_static_shape() {
        let csv = "Universe Name,Symbol1,Symbol2\nTech Leaders,AAPL,MSFT\n";
        let result = parse_universes_csv(csv).unwrap();
        assert_eq!(result.detected_format, CsvImportFormat::Static);
    }

    #[test]
    fn test_detects_temporal_shape() {
        let csv = "Universe Name,Snapshot Date,Symbol1,Change Reason\n\
                   Tech Leaders,2025-01-01,AAPL,Initial\n";
        let result = parse_universes_csv(csv).unwrap();
        assert_eq!(result.detected_format, CsvImportFormat::Temporal);
    }

    #[test]
    fn test_unrecognized_header_fails() {
        let csv = "Portfolio,Ticker\nGrowth,AAPL\n";
        let err = parse_universes_csv(csv).unwrap_err();
        assert!(matches!(err, ImportError::UnrecognizedHeader(_)));
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let err = parse_universes_csv("Universe Name,Symbol1\n").unwrap_err();
        assert!(matches!(err, ImportError::EmptyFile));
    }

    // ==================== static shape ====================

    #[test]
    fn test_static_rows_parse_symbols() {
        let csv = "Universe Name,Symbol1,Symbol2,Symbol3\n\
                   Tech Leaders,AAPL,MSFT,GOOG\n\
                   Dividends,KO,, \n";
        let result = parse_universes_csv(csv).unwrap();
        assert!(result.errors.is_empty());
        assert_eq!(result.row_count, 2);

        let ImportedUniverses::Static(universes) = result.universes else {
            panic!("expected static universes");
        };
        assert_eq!(universes.len(), 2);
        assert_eq!(universes[0].name, "Tech Leaders");
        assert_eq!(universes[0].symbols, vec!["AAPL", "MSFT", "GOOG"]);
        // Empty cells dropped.
        assert_eq!(universes[1].symbols, vec!["KO"]);
    }

    #[test]
    fn test_static_row_without_name_is_collected_as_error() {
        let csv = "Universe Name,Symbol1\n,AAPL\nValue,BRK.B\n";
        let result = parse_universes_csv(csv).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row_index, 1);

        let ImportedUniverses::Static(universes) = result.universes else {
            panic!("expected static universes");
        };
        assert_eq!(universes.len(), 1);
        assert_eq!(universes[0].name, "Value");
    }

    #[test]
    fn test_static_duplicate_symbols_deduplicated() {
        let csv = "Universe Name,Symbol1,Symbol2,Symbol3\nTech,AAPL,aapl,MSFT\n";
        let result = parse_universes_csv(csv).unwrap();
        let ImportedUniverses::Static(universes) = result.universes else {
            panic!("expected static universes");
        };
        assert_eq!(universes[0].symbols, vec!["AAPL", "MSFT"]);
    }

    // ==================== temporal shape ====================

    #[test]
    fn test_temporal_rows_sorted_by_date_not_row_order() {
        // Rows arrive newest first; chronology must come from the sort.
        let csv = "Universe Name,Snapshot Date,Symbol1,Symbol2,Symbol3,Change Reason\n\
                   Tech,2025-02-01,A,B,D,Quarterly screen\n\
                   Tech,2025-01-01,A,B,C,\n";
        let result = parse_universes_csv(csv).unwrap();
        assert!(result.errors.is_empty());

        let ImportedUniverses::Temporal(histories) = result.universes else {
            panic!("expected temporal universes");
        };
        assert_eq!(histories.len(), 1);
        let snapshots = &histories[0].snapshots;
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].snapshot_date, date(2025, 1, 1));
        assert_eq!(snapshots[1].snapshot_date, date(2025, 2, 1));

        // First snapshot has no baseline, second has computed deltas.
        assert!(snapshots[0].turnover_rate.is_none());
        assert!(snapshots[0].assets_added.is_none());
        assert_eq!(snapshots[1].assets_added.as_deref(), Some(&["D".to_string()][..]));
        assert_eq!(
            snapshots[1].assets_removed.as_deref(),
            Some(&["C".to_string()][..])
        );
        // (1 added + 1 removed) / (3 prior + 3 current)
        assert_eq!(
            snapshots[1].turnover_rate,
            Some(dec!(2) / dec!(6))
        );
    }

    #[test]
    fn test_temporal_reason_stamped_on_added_assets() {
        let csv = "Universe Name,Snapshot Date,Symbol1,Symbol2,Change Reason\n\
                   Tech,2025-01-01,A,B,\n\
                   Tech,2025-02-01,A,C,Replaced B\n";
        let result = parse_universes_csv(csv).unwrap();
        let ImportedUniverses::Temporal(histories) = result.universes else {
            panic!("expected temporal universes");
        };
        let second = &histories[0].snapshots[1];
        let added = second.assets.iter().find(|a| a.symbol == "C").unwrap();
        let kept = second.assets.iter().find(|a| a.symbol == "A").unwrap();
        assert_eq!(added.reason_added.as_deref(), Some("Replaced B"));
        assert!(kept.reason_added.is_none());
    }

    #[test]
    fn test_temporal_bad_date_is_row_error_parsing_continues() {
        let csv = "Universe Name,Snapshot Date,Symbol1,Change Reason\n\
                   Tech,not-a-date,A,\n\
                   Tech,2025-01-01,A,\n";
        let result = parse_universes_csv(csv).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row_index, 1);

        let ImportedUniverses::Temporal(histories) = result.universes else {
            panic!("expected temporal universes");
        };
        assert_eq!(histories[0].snapshots.len(), 1);
    }

    #[test]
    fn test_temporal_duplicate_date_is_fatal() {
        let csv = "Universe Name,Snapshot Date,Symbol1,Change Reason\n\
                   Tech,2025-01-01,A,\n\
                   Tech,2025-01-01,B,\n";
        let err = parse_universes_csv(csv).unwrap_err();
        assert!(matches!(
            err,
            ImportError::DuplicateSnapshotDate { ref universe, date: d }
                if universe == "Tech" && d == date(2025, 1, 1)
        ));
    }

    #[test]
    fn test_temporal_groups_multiple_universes_in_order() {
        let csv = "Universe Name,Snapshot Date,Symbol1,Change Reason\n\
                   Growth,2025-01-01,A,\n\
                   Value,2025-01-01,B,\n\
                   Growth,2025-02-01,C,\n";
        let result = parse_universes_csv(csv).unwrap();
        let ImportedUniverses::Temporal(histories) = result.universes else {
            panic!("expected temporal universes");
        };
        assert_eq!(histories.len(), 2);
        assert_eq!(histories[0].name, "Growth");
        assert_eq!(histories[0].snapshots.len(), 2);
        assert_eq!(histories[1].name, "Value");
    }

    #[test]
    fn test_temporal_snapshot_ids_are_unique() {
        let csv = "Universe Name,Snapshot Date,Symbol1,Change Reason\n\
                   Tech,2025-01-01,A,\n\
                   Tech,2025-02-01,A,\n";
        let result = parse_universes_csv(csv).unwrap();
        let ImportedUniverses::Temporal(histories) = result.universes else {
            panic!("expected temporal universes");
        };
        let snapshots = &histories[0].snapshots;
        assert_ne!(snapshots[0].id, snapshots[1].id);
        assert_eq!(snapshots[0].universe_id, "Tech");
    }

    // ==================== export ====================

    #[test]
    fn test_export_joins_symbols() {
        let universes = vec![
            UniverseDefinition {
                name: "Tech Leaders".to_string(),
                symbols: vec!["AAPL".to_string(), "MSFT".to_string()],
            },
            UniverseDefinition {
                name: "Value".to_string(),
                symbols: vec!["BRK.B".to_string()],
            },
        ];
        let csv = export_universes_csv(&universes).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Universe Name,Symbols"));
        // Comma-joined list lands in one quoted field.
        assert_eq!(lines.next(), Some("Tech Leaders,\"AAPL,MSFT\""));
        assert_eq!(lines.next(), Some("Value,BRK.B"));
    }

    #[test]
    fn test_export_then_import_preserves_names() {
        let universes = vec![UniverseDefinition {
            name: "Tech".to_string(),
            symbols: vec!["AAPL".to_string(), "MSFT".to_string()],
        }];
        let csv = export_universes_csv(&universes).unwrap();
        let result = parse_universes_csv(&csv).unwrap();
        assert_eq!(result.detected_format, CsvImportFormat::Static);
        let ImportedUniverses::Static(parsed) = result.universes else {
            panic!("expected static universes");
        };
        assert_eq!(parsed[0].name, "Tech");
        // The joined field comes back as one cell holding both symbols.
        assert_eq!(parsed[0].symbols, vec!["AAPL,MSFT"]);
    }
}
