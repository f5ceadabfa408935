use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{columns, EmployeeRecord, EmployeeTable, SalaryLevel};

/// Fixed source location of the HR dataset, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "hr_analytics_dataset.csv";

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Everything that can go wrong while loading a dataset. `Clone` so the
/// memoized load result can surface the same error on every call.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {message}")]
    Read { path: String, message: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: Attrition value '{value}' is not binary (expected 0/1 or true/false)")]
    NonBinaryAttrition { row: usize, value: String },

    #[error("row {row}: unknown salary level '{value}' (expected low, medium or high)")]
    UnknownSalaryLevel { row: usize, value: String },

    #[error("row {row}: column '{column}' has non-numeric value '{value}'")]
    NonNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Memoized default load
// ---------------------------------------------------------------------------

static DEFAULT_TABLE: OnceLock<Result<EmployeeTable, LoadError>> = OnceLock::new();

/// Load the dataset from [`DEFAULT_DATASET_PATH`], at most once per process.
/// Subsequent calls return the same cached table (or the same cached error).
pub fn cached_table() -> Result<&'static EmployeeTable, LoadError> {
    DEFAULT_TABLE
        .get_or_init(|| load_file(Path::new(DEFAULT_DATASET_PATH)))
        .as_ref()
        .map_err(|e| e.clone())
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an employee dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the required columns (see [`columns`])
/// * `.json` – records-oriented array, the default `df.to_json(orient='records')`
pub fn load_file(path: &Path) -> Result<EmployeeTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<EmployeeTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_csv(file)
}

/// Parse CSV from any reader. Split out of [`load_csv`] so tests can feed
/// in-memory input.
pub(crate) fn parse_csv(input: impl io::Read) -> Result<EmployeeTable, LoadError> {
    let mut reader = csv::Reader::from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let col_index = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };

    let dept_idx = col_index(columns::DEPARTMENT)?;
    let salary_idx = col_index(columns::SALARY_LEVEL)?;
    let attrition_idx = col_index(columns::ATTRITION)?;
    let satisfaction_idx = col_index(columns::SATISFACTION_LEVEL)?;
    let evaluation_idx = col_index(columns::LAST_EVALUATION)?;

    let core = [
        dept_idx,
        salary_idx,
        attrition_idx,
        satisfaction_idx,
        evaluation_idx,
    ];
    let extra_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !core.contains(i))
        .map(|(i, h)| (i, h.clone()))
        .collect();

    // Read everything up front so extra columns can be typed over the whole
    // file before records are built (a column is numeric only if every
    // non-empty cell parses).
    let mut rows: Vec<csv::StringRecord> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| LoadError::Malformed(format!("row {row_no}: {e}")))?;
        rows.push(record);
    }

    let mut numeric_extras: Vec<(usize, String)> = Vec::new();
    for (idx, name) in &extra_cols {
        let all_numeric = rows.iter().all(|row| {
            let cell = row.get(*idx).unwrap_or("").trim();
            cell.is_empty() || cell.parse::<f64>().is_ok()
        });
        if all_numeric {
            numeric_extras.push((*idx, name.clone()));
        } else {
            log::warn!("dropping non-numeric column '{name}' from the metric set");
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.iter().enumerate() {
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        let salary_raw = cell(salary_idx);
        let salary_level =
            SalaryLevel::parse(salary_raw).ok_or_else(|| LoadError::UnknownSalaryLevel {
                row: row_no,
                value: salary_raw.to_string(),
            })?;

        let attrition_raw = cell(attrition_idx);
        let attrition =
            parse_attrition(attrition_raw).ok_or_else(|| LoadError::NonBinaryAttrition {
                row: row_no,
                value: attrition_raw.to_string(),
            })?;

        let satisfaction_level =
            parse_core_f64(cell(satisfaction_idx), row_no, columns::SATISFACTION_LEVEL)?;
        let last_evaluation =
            parse_core_f64(cell(evaluation_idx), row_no, columns::LAST_EVALUATION)?;

        let mut metrics = BTreeMap::new();
        for (idx, name) in &numeric_extras {
            let raw = cell(*idx);
            let value = if raw.is_empty() {
                f64::NAN
            } else {
                // Whole-column check above guarantees this parses.
                raw.parse::<f64>().unwrap_or(f64::NAN)
            };
            metrics.insert(name.clone(), value);
        }

        records.push(EmployeeRecord {
            department: cell(dept_idx).to_string(),
            salary_level,
            attrition,
            satisfaction_level,
            last_evaluation,
            metrics,
        });
    }

    Ok(EmployeeTable::from_records(records))
}

/// Strict binary parse of the Attrition column: 0/1 or true/false only.
fn parse_attrition(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "0" | "false" => Some(false),
        "1" | "true" => Some(true),
        _ => None,
    }
}

fn parse_core_f64(raw: &str, row: usize, column: &'static str) -> Result<f64, LoadError> {
    raw.parse::<f64>().map_err(|_| LoadError::NonNumeric {
        row,
        column,
        value: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON row. Extra keys land in `extras` and are kept only
/// where they carry numbers.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "SalaryLevel")]
    salary_level: String,
    #[serde(rename = "Attrition")]
    attrition: JsonValue,
    #[serde(rename = "SatisfactionLevel")]
    satisfaction_level: f64,
    #[serde(rename = "LastEvaluation")]
    last_evaluation: f64,
    #[serde(flatten)]
    extras: BTreeMap<String, JsonValue>,
}

fn load_json(path: &Path) -> Result<EmployeeTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let raw: Vec<JsonRecord> =
        serde_json::from_str(&text).map_err(|e| LoadError::Malformed(e.to_string()))?;

    let mut records = Vec::with_capacity(raw.len());
    for (row_no, rec) in raw.into_iter().enumerate() {
        let salary_level =
            SalaryLevel::parse(&rec.salary_level).ok_or_else(|| LoadError::UnknownSalaryLevel {
                row: row_no,
                value: rec.salary_level.clone(),
            })?;

        let attrition =
            attrition_from_json(&rec.attrition).ok_or_else(|| LoadError::NonBinaryAttrition {
                row: row_no,
                value: rec.attrition.to_string(),
            })?;

        let metrics: BTreeMap<String, f64> = rec
            .extras
            .iter()
            .filter_map(|(k, v)| v.as_f64().map(|f| (k.clone(), f)))
            .collect();

        records.push(EmployeeRecord {
            department: rec.department,
            salary_level,
            attrition,
            satisfaction_level: rec.satisfaction_level,
            last_evaluation: rec.last_evaluation,
            metrics,
        });
    }

    Ok(EmployeeTable::from_records(records))
}

fn attrition_from_json(val: &JsonValue) -> Option<bool> {
    match val {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        JsonValue::String(s) => parse_attrition(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CSV: &str = "\
Department,SalaryLevel,Attrition,SatisfactionLevel,LastEvaluation,TenureYears
Sales,low,1,0.38,0.53,3
R&D,high,0,0.80,0.86,6
Support,medium,0,0.72,0.87,4
";

    #[test]
    fn parses_valid_csv() {
        let table = parse_csv(VALID_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.departments.len(), 3);
        assert_eq!(table.metric_columns, vec!["TenureYears".to_string()]);

        let first = &table.records[0];
        assert_eq!(first.department, "Sales");
        assert_eq!(first.salary_level, SalaryLevel::Low);
        assert!(first.attrition);
        assert_eq!(first.metrics.get("TenureYears"), Some(&3.0));
    }

    #[test]
    fn rejects_non_binary_attrition() {
        let csv = "\
Department,SalaryLevel,Attrition,SatisfactionLevel,LastEvaluation
Sales,low,2,0.5,0.5
";
        match parse_csv(csv.as_bytes()) {
            Err(LoadError::NonBinaryAttrition { row: 0, value }) => assert_eq!(value, "2"),
            other => panic!("expected NonBinaryAttrition, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_salary_level() {
        let csv = "\
Department,SalaryLevel,Attrition,SatisfactionLevel,LastEvaluation
Sales,enormous,0,0.5,0.5
";
        assert!(matches!(
            parse_csv(csv.as_bytes()),
            Err(LoadError::UnknownSalaryLevel { row: 0, .. })
        ));
    }

    #[test]
    fn rejects_missing_required_column() {
        let csv = "\
Department,SalaryLevel,SatisfactionLevel,LastEvaluation
Sales,low,0.5,0.5
";
        assert!(matches!(
            parse_csv(csv.as_bytes()),
            Err(LoadError::MissingColumn(columns::ATTRITION))
        ));
    }

    #[test]
    fn drops_non_numeric_extra_column() {
        let csv = "\
Department,SalaryLevel,Attrition,SatisfactionLevel,LastEvaluation,Manager,TenureYears
Sales,low,0,0.5,0.5,Alice,3
R&D,high,1,0.4,0.9,Bob,7
";
        let table = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.metric_columns, vec!["TenureYears".to_string()]);
        assert!(table.records[0].metrics.get("Manager").is_none());
        assert_eq!(table.records[1].metrics.get("TenureYears"), Some(&7.0));
    }

    #[test]
    fn accepts_boolean_attrition_spelling() {
        let csv = "\
Department,SalaryLevel,Attrition,SatisfactionLevel,LastEvaluation
Sales,low,True,0.5,0.5
R&D,high,false,0.4,0.9
";
        let table = parse_csv(csv.as_bytes()).unwrap();
        assert!(table.records[0].attrition);
        assert!(!table.records[1].attrition);
    }

    #[test]
    fn cached_table_is_memoized() {
        // The sample dataset ships at the crate root, which is the working
        // directory under `cargo test`.
        let first = cached_table().unwrap();
        let second = cached_table().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(!first.is_empty());
    }
}
