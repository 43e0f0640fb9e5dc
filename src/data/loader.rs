//! CSV persistence for the call record table.
//!
//! Reads the documented column set (English or the legacy Spanish
//! headers), re-derives `month`/`weekday` from `date`, validates ranges and
//! the agent lookup, and writes tables back out in the canonical format.

use crate::error::DataError;
use crate::models::{parse_weekday, ranges, weekday_label, CallCategory, CallRecord, Shift};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// Options controlling how strictly a CSV file is validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Clamp out-of-range scores instead of rejecting the file.
    pub clamp_out_of_range: bool,
}

/// Bookkeeping gathered while loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    /// Number of data rows read.
    pub rows: usize,
    /// Rows whose stored month or weekday disagreed with the date.
    pub calendar_mismatches: usize,
    /// Individual values clamped into range.
    pub clamped_values: usize,
}

/// A loaded table plus what the loader noticed along the way.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub records: Vec<CallRecord>,
    pub summary: LoadSummary,
}

/// One CSV row as it appears on disk.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "fecha")]
    date: String,
    #[serde(default, alias = "mes")]
    month: Option<u32>,
    #[serde(default, alias = "dia_semana")]
    weekday: Option<String>,
    #[serde(alias = "id_agente")]
    agent_id: String,
    #[serde(alias = "nombre_agente")]
    agent_name: String,
    #[serde(alias = "experiencia_meses")]
    tenure_months: u32,
    #[serde(alias = "turno")]
    shift: String,
    #[serde(alias = "categoria_llamada")]
    category: String,
    #[serde(alias = "llamadas_por_turno")]
    calls_handled: u32,
    #[serde(alias = "duracion_promedio_min")]
    avg_duration_min: f64,
    #[serde(alias = "score_satisfaccion")]
    satisfaction: f64,
    #[serde(alias = "score_qa")]
    qa_score: f64,
    #[serde(alias = "tasa_error_pct")]
    error_rate_pct: f64,
    #[serde(alias = "resolucion_primera")]
    first_call_resolution: String,
}

/// Canonical output row.
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    date: String,
    month: u32,
    weekday: &'static str,
    agent_id: &'a str,
    agent_name: &'a str,
    tenure_months: u32,
    shift: &'static str,
    category: &'static str,
    calls_handled: u32,
    avg_duration_min: f64,
    satisfaction: f64,
    qa_score: f64,
    error_rate_pct: f64,
    first_call_resolution: &'static str,
}

impl<'a> From<&'a CallRecord> for OutputRow<'a> {
    fn from(record: &'a CallRecord) -> Self {
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            month: record.month,
            weekday: weekday_label(record.weekday),
            agent_id: &record.agent_id,
            agent_name: &record.agent_name,
            tenure_months: record.tenure_months,
            shift: record.shift.label(),
            category: record.category.label(),
            calls_handled: record.calls_handled,
            avg_duration_min: record.avg_duration_min,
            satisfaction: record.satisfaction,
            qa_score: record.qa_score,
            error_rate_pct: record.error_rate_pct,
            first_call_resolution: if record.first_call_resolution { "Yes" } else { "No" },
        }
    }
}

/// Load a CSV file from disk.
pub fn load_csv(path: &Path, options: LoadOptions) -> Result<LoadedTable, DataError> {
    info!("Loading call records from {}", path.display());
    let file = std::fs::File::open(path)?;
    read_csv(file, options)
}

/// Read a CSV table from any reader.
pub fn read_csv<R: io::Read>(reader: R, options: LoadOptions) -> Result<LoadedTable, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    let mut summary = LoadSummary::default();
    let mut agents: HashMap<String, (String, u32)> = HashMap::new();
    // Agents are selected and grouped by display name, so each name maps to one id.
    let mut ids_by_name: HashMap<String, String> = HashMap::new();

    for result in csv_reader.records() {
        let raw = result?;
        let line = raw.position().map(|p| p.line()).unwrap_or(0);
        let row: CsvRow = raw.deserialize(Some(&headers))?;
        let record = to_record(row, line, options, &mut summary)?;

        match agents.get(&record.agent_id) {
            Some((name, tenure)) if *name != record.agent_name || *tenure != record.tenure_months => {
                return Err(DataError::InconsistentAgent {
                    agent_id: record.agent_id.clone(),
                    first: format!("{} ({} months)", name, tenure),
                    second: format!("{} ({} months)", record.agent_name, record.tenure_months),
                });
            }
            Some(_) => {}
            None => {
                if let Some(first_id) = ids_by_name.get(&record.agent_name) {
                    return Err(DataError::SharedAgentName {
                        line,
                        name: record.agent_name.clone(),
                        first_id: first_id.clone(),
                        second_id: record.agent_id.clone(),
                    });
                }
                ids_by_name.insert(record.agent_name.clone(), record.agent_id.clone());
                agents.insert(
                    record.agent_id.clone(),
                    (record.agent_name.clone(), record.tenure_months),
                );
            }
        }

        records.push(record);
    }

    if records.is_empty() {
        return Err(DataError::Empty);
    }

    summary.rows = records.len();
    if summary.calendar_mismatches > 0 {
        warn!(
            "{} rows had month/weekday values that disagree with their date; re-derived",
            summary.calendar_mismatches
        );
    }
    if summary.clamped_values > 0 {
        warn!("{} out-of-range values were clamped", summary.clamped_values);
    }
    debug!(
        "Loaded {} records for {} agents",
        summary.rows,
        agents.len()
    );

    Ok(LoadedTable { records, summary })
}

/// Write a table to disk in the canonical column format.
pub fn write_csv(path: &Path, records: &[CallRecord]) -> Result<(), DataError> {
    let file = std::fs::File::create(path)?;
    write_csv_to(file, records)?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Write a table to any writer in the canonical column format.
pub fn write_csv_to<W: io::Write>(writer: W, records: &[CallRecord]) -> Result<(), DataError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(OutputRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn to_record(
    row: CsvRow,
    line: u64,
    options: LoadOptions,
    summary: &mut LoadSummary,
) -> Result<CallRecord, DataError> {
    let invalid = |field: &'static str, value: &str| DataError::InvalidValue {
        line,
        field,
        value: value.to_string(),
    };

    let date = parse_date(&row.date).ok_or_else(|| invalid("date", &row.date))?;
    let (month, weekday) = CallRecord::derive_calendar(date);

    let stored_weekday = match row.weekday.as_deref().filter(|s| !s.is_empty()) {
        Some(label) => Some(parse_weekday(label).ok_or_else(|| invalid("weekday", label))?),
        None => None,
    };
    let month_differs = row.month.map_or(false, |m| m != month);
    let weekday_differs = stored_weekday.map_or(false, |d| d != weekday);
    if month_differs || weekday_differs {
        debug!("line {}: calendar columns disagree with date {}", line, date);
        summary.calendar_mismatches += 1;
    }

    let shift: Shift = row.shift.parse().map_err(|_| invalid("shift", &row.shift))?;
    let category: CallCategory = row
        .category
        .parse()
        .map_err(|_| invalid("category", &row.category))?;
    let first_call_resolution = parse_yes_no(&row.first_call_resolution)
        .ok_or_else(|| invalid("first_call_resolution", &row.first_call_resolution))?;

    let mut check = |field: &'static str, value: f64, (min, max): (f64, f64)| {
        check_range(line, field, value, min, max, options, summary)
    };
    let avg_duration_min = check("avg_duration_min", row.avg_duration_min, ranges::DURATION)?;
    let satisfaction = check("satisfaction", row.satisfaction, ranges::SATISFACTION)?;
    let qa_score = check("qa_score", row.qa_score, ranges::QA_SCORE)?;
    let error_rate_pct = check("error_rate_pct", row.error_rate_pct, ranges::ERROR_RATE)?;

    if row.agent_id.is_empty() {
        return Err(invalid("agent_id", &row.agent_id));
    }

    Ok(CallRecord {
        date,
        month,
        weekday,
        agent_id: row.agent_id,
        agent_name: row.agent_name,
        tenure_months: row.tenure_months,
        shift,
        category,
        calls_handled: row.calls_handled,
        avg_duration_min,
        satisfaction,
        qa_score,
        error_rate_pct,
        first_call_resolution,
    })
}

fn check_range(
    line: u64,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    options: LoadOptions,
    summary: &mut LoadSummary,
) -> Result<f64, DataError> {
    if !value.is_finite() {
        return Err(DataError::InvalidValue {
            line,
            field,
            value: value.to_string(),
        });
    }
    if (min..=max).contains(&value) {
        return Ok(value);
    }
    if options.clamp_out_of_range {
        debug!("line {}: clamping {} {} into [{}, {}]", line, field, value, min, max);
        summary.clamped_values += 1;
        return Ok(value.clamp(min, max));
    }
    Err(DataError::OutOfRange {
        line,
        field,
        value,
        min,
        max,
    })
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time of day.
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
}

fn parse_yes_no(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "yes" | "y" | "si" | "sí" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::{generate, GeneratorSettings};
    use chrono::Weekday;

    const HEADER: &str = "date,month,weekday,agent_id,agent_name,tenure_months,shift,category,calls_handled,avg_duration_min,satisfaction,qa_score,error_rate_pct,first_call_resolution\n";

    fn fixture_path() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/legacy_calls.csv")
    }

    #[test]
    fn test_round_trip_reproduces_generated_table() {
        let generated = generate(&GeneratorSettings::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.csv");

        write_csv(&path, &generated).unwrap();
        let loaded = load_csv(&path, LoadOptions::default()).unwrap();

        assert_eq!(loaded.records, generated);
        assert_eq!(loaded.summary.rows, generated.len());
        assert_eq!(loaded.summary.calendar_mismatches, 0);
        assert_eq!(loaded.summary.clamped_values, 0);
    }

    #[test]
    fn test_load_legacy_spanish_fixture() {
        let loaded = load_csv(&fixture_path(), LoadOptions::default()).unwrap();
        assert_eq!(loaded.records.len(), 6);

        let first = &loaded.records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(first.weekday, Weekday::Mon);
        assert_eq!(first.shift, Shift::Night);
        assert_eq!(first.category, CallCategory::Cancellation);
        assert!(!first.first_call_resolution);
        assert_eq!(first.agent_name, "Carlos Mendez");
    }

    #[test]
    fn test_calendar_columns_are_rederived() {
        // 2024-01-05 is a Friday in January; the row claims Monday in March.
        let csv = format!(
            "{}2024-01-05,3,Mon,AG01,Carlos Mendez,36,Morning,Renewal,20,8.0,7.5,80.0,10.0,Yes\n",
            HEADER
        );
        let loaded = read_csv(csv.as_bytes(), LoadOptions::default()).unwrap();

        assert_eq!(loaded.records[0].month, 1);
        assert_eq!(loaded.records[0].weekday, Weekday::Fri);
        assert_eq!(loaded.summary.calendar_mismatches, 1);
    }

    #[test]
    fn test_calendar_columns_optional() {
        let csv = "date,agent_id,agent_name,tenure_months,shift,category,calls_handled,avg_duration_min,satisfaction,qa_score,error_rate_pct,first_call_resolution\n\
                   2024-02-10 00:00:00,AG02,Laura Rios,24,Tarde,Queja,12,6.5,6.1,71.0,15.2,No\n";
        let loaded = read_csv(csv.as_bytes(), LoadOptions::default()).unwrap();

        assert_eq!(loaded.records[0].month, 2);
        assert_eq!(loaded.records[0].weekday, Weekday::Sat);
        assert_eq!(loaded.summary.calendar_mismatches, 0);
    }

    #[test]
    fn test_out_of_range_rejected_by_default() {
        let csv = format!(
            "{}2024-01-05,1,Fri,AG01,Carlos Mendez,36,Morning,Renewal,20,8.0,11.5,80.0,10.0,Yes\n",
            HEADER
        );
        let err = read_csv(csv.as_bytes(), LoadOptions::default()).unwrap_err();
        match err {
            DataError::OutOfRange { line, field, .. } => {
                assert_eq!(line, 2);
                assert_eq!(field, "satisfaction");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_out_of_range_clamped_when_enabled() {
        let csv = format!(
            "{}2024-01-05,1,Fri,AG01,Carlos Mendez,36,Morning,Renewal,20,8.0,11.5,104.0,10.0,Yes\n",
            HEADER
        );
        let options = LoadOptions {
            clamp_out_of_range: true,
        };
        let loaded = read_csv(csv.as_bytes(), options).unwrap();

        assert_eq!(loaded.records[0].satisfaction, 10.0);
        assert_eq!(loaded.records[0].qa_score, 100.0);
        assert_eq!(loaded.summary.clamped_values, 2);
    }

    #[test]
    fn test_inconsistent_agent_rejected() {
        let csv = format!(
            "{h}2024-01-05,1,Fri,AG01,Carlos Mendez,36,Morning,Renewal,20,8.0,7.0,80.0,10.0,Yes\n\
             2024-01-06,1,Sat,AG01,Carla Mendez,36,Morning,Renewal,20,8.0,7.0,80.0,10.0,Yes\n",
            h = HEADER
        );
        let err = read_csv(csv.as_bytes(), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::InconsistentAgent { ref agent_id, .. } if agent_id == "AG01"));
    }

    #[test]
    fn test_name_shared_by_two_ids_rejected() {
        let csv = format!(
            "{h}2024-01-05,1,Fri,A1,Maria Lopez,12,Morning,Renewal,20,8.0,7.0,80.0,10.0,Yes\n\
             2024-01-06,1,Sat,A2,Maria Lopez,12,Night,Complaint,18,9.0,6.0,70.0,12.0,No\n",
            h = HEADER
        );
        let err = read_csv(csv.as_bytes(), LoadOptions::default()).unwrap_err();
        match err {
            DataError::SharedAgentName {
                line,
                name,
                first_id,
                second_id,
            } => {
                assert_eq!(line, 3);
                assert_eq!(name, "Maria Lopez");
                assert_eq!(first_id, "A1");
                assert_eq!(second_id, "A2");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_repeated_agent_keeps_one_selector_entry() {
        let csv = format!(
            "{h}2024-01-05,1,Fri,A1,Maria Lopez,12,Morning,Renewal,20,8.0,7.0,80.0,10.0,Yes\n\
             2024-01-06,1,Sat,A1,Maria Lopez,12,Night,Complaint,18,9.0,6.0,70.0,12.0,No\n",
            h = HEADER
        );
        let loaded = read_csv(csv.as_bytes(), LoadOptions::default()).unwrap();
        let options = crate::filter::FilterOptions::from_records(&loaded.records).unwrap();
        assert_eq!(options.agents.len(), 1);

        let filter = crate::filter::Filter {
            agent: Some("Maria Lopez".to_string()),
            ..Default::default()
        };
        let resolved = filter.resolve(&options).unwrap();
        assert_eq!(resolved.apply(&loaded.records).len(), 2);
    }

    #[test]
    fn test_invalid_labels_reported_with_line() {
        let csv = format!(
            "{}2024-01-05,1,Fri,AG01,Carlos Mendez,36,Evening,Renewal,20,8.0,7.0,80.0,10.0,Yes\n",
            HEADER
        );
        let err = read_csv(csv.as_bytes(), LoadOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "line 2: invalid shift 'Evening'");
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let csv = format!(
            "{}2024-01-05,1,Fri,AG01,Carlos Mendez,36,Morning,Renewal,lots,8.0,7.0,80.0,10.0,Yes\n",
            HEADER
        );
        let err = read_csv(csv.as_bytes(), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = read_csv(HEADER.as_bytes(), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::Empty));
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("Si"), Some(true));
        assert_eq!(parse_yes_no("YES"), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }
}
