use crate::error::AppError;
use crate::loader::dates;
use crate::loader::records::{BoutRecord, BoutTable, ColumnPresence, LoadReport};
use csv::StringRecord;
use std::io;
use std::path::Path;

/// Columns every usable bout log must carry.
pub const REQUIRED_COLUMNS: &[&str] = &["winner", "loser", "method"];

/// Legacy finish labels remapped to the canonical token at load time.
/// Exact matches only; the substring classifier handles everything else.
/// The trailing-space variant shows up in older exports.
const KO_TKO_SYNONYMS: &[&str] = &["KO", "TKO", "Knockout", "Technical Knockout", "KO/TKO "];
const KO_TKO_CANONICAL: &str = "KO/TKO";

/// Column indices resolved once from the header row.
struct Schema {
    winner: usize,
    loser: usize,
    method: usize,
    date: Option<usize>,
    weight_class: Option<usize>,
    round: Option<usize>,
    time_minutes: Option<usize>,
    winner_strikes_landed: Option<usize>,
    winner_strikes_attempted: Option<usize>,
    winner_takedowns: Option<usize>,
    winner_takedown_attempts: Option<usize>,
    loser_strikes_landed: Option<usize>,
    loser_strikes_attempted: Option<usize>,
    loser_takedowns: Option<usize>,
    loser_takedown_attempts: Option<usize>,
}

impl Schema {
    fn from_headers(headers: &[String]) -> Result<Self, AppError> {
        let find = |name: &str| headers.iter().position(|header| header == name);

        let (Some(winner), Some(loser), Some(method)) =
            (find("winner"), find("loser"), find("method"))
        else {
            let missing: Vec<String> = REQUIRED_COLUMNS
                .iter()
                .filter(|name| find(name).is_none())
                .map(|name| name.to_string())
                .collect();
            return Err(AppError::MissingColumns(missing));
        };

        Ok(Schema {
            winner,
            loser,
            method,
            date: find("date"),
            weight_class: find("weight_class"),
            round: find("round"),
            time_minutes: find("time_minutes"),
            winner_strikes_landed: find("winner_strikes_landed"),
            winner_strikes_attempted: find("winner_strikes_attempted"),
            winner_takedowns: find("winner_takedowns"),
            winner_takedown_attempts: find("winner_takedown_attempts"),
            loser_strikes_landed: find("loser_strikes_landed"),
            loser_strikes_attempted: find("loser_strikes_attempted"),
            loser_takedowns: find("loser_takedowns"),
            loser_takedown_attempts: find("loser_takedown_attempts"),
        })
    }

    /// Table-wide optional-column presence. The stat groups key off their
    /// landed-strikes column, matching how the source data ships.
    fn presence(&self) -> ColumnPresence {
        ColumnPresence {
            date: self.date.is_some(),
            weight_class: self.weight_class.is_some(),
            round: self.round.is_some(),
            time_minutes: self.time_minutes.is_some(),
            winner_stats: self.winner_strikes_landed.is_some(),
            loser_stats: self.loser_strikes_landed.is_some(),
        }
    }
}

/// Read a bout log into the canonical table.
///
/// Loading fails outright on a missing file, a missing required column,
/// or a malformed record. Rows with an unparsable date or a blank
/// winner/loser are dropped and counted instead.
pub fn load(path: &Path) -> Result<LoadReport, AppError> {
    // Short rows pad out as empty cells rather than failing the load.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| open_error(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::ParseError(format!("cannot read header row: {}", e)))?
        .iter()
        .map(clean_header)
        .collect();

    let schema = Schema::from_headers(&headers)?;

    let mut bouts = Vec::new();
    let mut dropped_invalid_dates = 0;
    let mut dropped_missing_names = 0;

    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            AppError::ParseError(format!("malformed record on line {}: {}", row + 2, e))
        })?;

        // Bad dates go first, then rows with a blank winner or loser.
        let date = match schema.date {
            Some(idx) => match dates::parse_flexible(field(&record, idx)) {
                Some(date) => Some(date),
                None => {
                    dropped_invalid_dates += 1;
                    continue;
                }
            },
            None => None,
        };

        let winner = field(&record, schema.winner).trim();
        let loser = field(&record, schema.loser).trim();
        if winner.is_empty() || loser.is_empty() {
            dropped_missing_names += 1;
            continue;
        }

        bouts.push(BoutRecord {
            winner: winner.to_string(),
            loser: loser.to_string(),
            method: canonicalize_method(field(&record, schema.method)),
            date,
            weight_class: schema.weight_class.and_then(|idx| optional_text(&record, idx)),
            round: schema.round.and_then(|idx| parse_count(field(&record, idx))),
            time_minutes: schema
                .time_minutes
                .and_then(|idx| parse_minutes(field(&record, idx))),
            winner_strikes_landed: schema
                .winner_strikes_landed
                .and_then(|idx| parse_count(field(&record, idx))),
            winner_strikes_attempted: schema
                .winner_strikes_attempted
                .and_then(|idx| parse_count(field(&record, idx))),
            winner_takedowns: schema
                .winner_takedowns
                .and_then(|idx| parse_count(field(&record, idx))),
            winner_takedown_attempts: schema
                .winner_takedown_attempts
                .and_then(|idx| parse_count(field(&record, idx))),
            loser_strikes_landed: schema
                .loser_strikes_landed
                .and_then(|idx| parse_count(field(&record, idx))),
            loser_strikes_attempted: schema
                .loser_strikes_attempted
                .and_then(|idx| parse_count(field(&record, idx))),
            loser_takedowns: schema
                .loser_takedowns
                .and_then(|idx| parse_count(field(&record, idx))),
            loser_takedown_attempts: schema
                .loser_takedown_attempts
                .and_then(|idx| parse_count(field(&record, idx))),
        });
    }

    Ok(LoadReport {
        table: BoutTable {
            bouts,
            columns: schema.presence(),
        },
        dropped_invalid_dates,
        dropped_missing_names,
    })
}

fn open_error(path: &Path, error: csv::Error) -> AppError {
    match error.kind() {
        csv::ErrorKind::Io(io_error) if io_error.kind() == io::ErrorKind::NotFound => {
            AppError::FileNotFound(path.to_path_buf())
        }
        _ => AppError::ParseError(format!("cannot open {}: {}", path.display(), error)),
    }
}

/// Strip a UTF-8 BOM and padding; exports disagree on both.
fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

fn field<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("")
}

fn canonicalize_method(raw: &str) -> String {
    let trimmed = raw.trim();
    if KO_TKO_SYNONYMS.contains(&trimmed) {
        KO_TKO_CANONICAL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn optional_text(record: &StringRecord, idx: usize) -> Option<String> {
    let trimmed = field(record, idx).trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Counts arrive as integers, but spreadsheet exports sometimes write
/// them as floats ("12.0"). Non-numeric and negative values are absent.
fn parse_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value as u32)
}

fn parse_minutes(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("fights.csv");
        fs::write(&path, body).unwrap();
        path
    }

    const FULL_HEADER: &str = "date,winner,loser,method,weight_class,round,time_minutes,\
winner_strikes_landed,winner_strikes_attempted,winner_takedowns,winner_takedown_attempts,\
loser_strikes_landed,loser_strikes_attempted,loser_takedowns,loser_takedown_attempts";

    #[test]
    fn loads_a_well_formed_file() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            &format!(
                "{}\n2021-01-01,Reyes,Volkov,KO (Head Kick),Heavyweight,2,7.5,45,90,1,3,20,61,0,2\n",
                FULL_HEADER
            ),
        );

        let report = load(&path).unwrap();
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.dropped_total(), 0);
        assert!(report.table.columns.date);
        assert!(report.table.columns.winner_stats);
        assert!(report.table.columns.loser_stats);

        let bout = &report.table.bouts[0];
        assert_eq!(bout.winner, "Reyes");
        assert_eq!(bout.loser, "Volkov");
        assert_eq!(bout.method, "KO (Head Kick)");
        assert_eq!(bout.round, Some(2));
        assert_eq!(bout.time_minutes, Some(7.5));
        assert_eq!(bout.winner_strikes_landed, Some(45));
        assert_eq!(bout.loser_strikes_attempted, Some(61));
    }

    #[test]
    fn missing_method_column_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "winner,loser\nA,B\n");

        let err = load(&path).unwrap_err();
        match err {
            AppError::MissingColumns(names) => assert_eq!(names, vec!["method"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "winner,date\nA,2021-01-01\n");

        let err = load(&path).unwrap_err();
        match err {
            AppError::MissingColumns(names) => assert_eq!(names, vec!["loser", "method"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn rows_with_unparsable_dates_are_dropped_and_counted() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "date,winner,loser,method\n\
             2021-01-01,A,B,KO/TKO\n\
             not a date,C,D,KO/TKO\n\
             ,E,F,KO/TKO\n",
        );

        let report = load(&path).unwrap();
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.dropped_invalid_dates, 2);
        assert_eq!(report.dropped_missing_names, 0);
    }

    #[test]
    fn rows_with_blank_names_are_dropped_and_counted() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "winner,loser,method\nA,B,KO/TKO\n,B,KO/TKO\nA,   ,KO/TKO\n",
        );

        let report = load(&path).unwrap();
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.dropped_missing_names, 2);
        assert_eq!(report.dropped_invalid_dates, 0);
    }

    #[test]
    fn doubly_bad_rows_count_once_under_invalid_date() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "date,winner,loser,method\nnot a date,,B,KO/TKO\n",
        );

        let report = load(&path).unwrap();
        assert_eq!(report.table.len(), 0);
        assert_eq!(report.dropped_invalid_dates, 1);
        assert_eq!(report.dropped_missing_names, 0);
    }

    #[test]
    fn tables_without_a_date_column_keep_row_order() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "winner,loser,method\nA,B,KO/TKO\nC,D,Decision\n");

        let report = load(&path).unwrap();
        assert_eq!(report.table.len(), 2);
        assert!(!report.table.columns.date);
        assert_eq!(report.table.bouts[0].winner, "A");
        assert_eq!(report.table.bouts[1].winner, "C");
    }

    #[test]
    fn headers_are_cleaned_of_bom_and_padding() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "\u{feff}winner, loser ,method\nA,B,KO/TKO\n");

        let report = load(&path).unwrap();
        assert_eq!(report.table.len(), 1);
    }

    #[test]
    fn legacy_method_labels_are_remapped() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "winner,loser,method\n\
             A,B,KO\n\
             C,D,TKO\n\
             E,F,Technical Knockout\n\
             G,H,  KO/TKO  \n\
             I,J,Submission (Armbar)\n",
        );

        let report = load(&path).unwrap();
        let methods: Vec<&str> = report
            .table
            .bouts
            .iter()
            .map(|bout| bout.method.as_str())
            .collect();
        assert_eq!(
            methods,
            vec![
                "KO/TKO",
                "KO/TKO",
                "KO/TKO",
                "KO/TKO",
                "Submission (Armbar)"
            ]
        );
    }

    #[test]
    fn numeric_cells_tolerate_float_exports() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "winner,loser,method,round,winner_strikes_landed\nA,B,KO/TKO,3.0,45.0\n",
        );

        let report = load(&path).unwrap();
        let bout = &report.table.bouts[0];
        assert_eq!(bout.round, Some(3));
        assert_eq!(bout.winner_strikes_landed, Some(45));
    }

    #[test]
    fn unreadable_numeric_cells_become_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "winner,loser,method,round,time_minutes\nA,B,KO/TKO,N/A,\n",
        );

        let report = load(&path).unwrap();
        let bout = &report.table.bouts[0];
        assert_eq!(bout.round, None);
        assert_eq!(bout.time_minutes, None);
    }

    #[test]
    fn short_rows_pad_out_as_empty_cells() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "winner,loser,method,weight_class\nA,B,KO/TKO\n",
        );

        let report = load(&path).unwrap();
        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.bouts[0].weight_class, None);
    }

    #[test]
    fn missing_file_is_reported_distinctly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fights.csv");
        fs::write(&path, b"winner,loser,method\nA\xff\xfe,B,KO\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }
}
