//! Claims data loader
//!
//! Reads a delimited claims extract into a typed [`Dataset`] and prepares the
//! modeling dataset: allow-list projection, removal of rows without a
//! severity, and categorical casting.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use core_kernel::{Column, ColumnData, ColumnKind, Dataset};

use crate::error::ClaimDataError;
use crate::schema::{CATEGORICAL_COLUMNS, MODEL_COLUMNS, SEVERITY};

/// Field values read as missing
const MISSING_MARKERS: [&str; 9] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>"];

/// What happened while loading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    /// Input file
    pub source: PathBuf,
    /// Rows in the input file
    pub raw_rows: usize,
    /// Rows kept after dropping missing severities
    pub retained_rows: usize,
    /// Rows dropped for a missing severity
    pub dropped_rows: usize,
    /// Columns kept, in order
    pub columns: Vec<String>,
    /// Allow-listed columns not present in the input
    pub absent_columns: Vec<String>,
}

/// The modeling dataset together with its load report
#[derive(Debug, Clone)]
pub struct LoadedClaims {
    pub dataset: Dataset,
    pub report: LoadReport,
}

/// Loads the modeling dataset from a claims file
///
/// # Arguments
///
/// * `path` - Comma-delimited file with a header row
///
/// # Errors
///
/// * `ClaimDataError::DataLoad` if the file is absent, unreadable or malformed
/// * `ClaimDataError::Schema` if the severity column is absent or not numeric
pub fn load_claims(path: &Path) -> Result<LoadedClaims, ClaimDataError> {
    info!(path = %path.display(), "Loading claims data");

    let raw = read_table(path, &CATEGORICAL_COLUMNS)?;
    let (dataset, mut report) = prepare_model_dataset(&raw)?;
    report.source = path.to_path_buf();

    info!(
        raw_rows = report.raw_rows,
        retained_rows = report.retained_rows,
        columns = report.columns.len(),
        "Claims data loaded"
    );
    Ok(LoadedClaims { dataset, report })
}

/// Reads a delimited file into a typed table
///
/// A column is numeric when every non-missing field parses as a finite number,
/// otherwise it is text. Columns named in `text_columns` are always text so
/// their labels keep their original spelling.
///
/// # Errors
///
/// Returns `ClaimDataError::DataLoad` if the file cannot be opened or parsed
pub fn read_table(path: &Path, text_columns: &[&str]) -> Result<Dataset, ClaimDataError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ClaimDataError::data_load(path, e))?;
    read_records(reader, path, text_columns)
}

/// Reads a delimited table from any reader; `source` names it in errors
pub fn read_table_from_reader<R: Read>(
    reader: R,
    source: &Path,
    text_columns: &[&str],
) -> Result<Dataset, ClaimDataError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    read_records(reader, source, text_columns)
}

fn read_records<R: Read>(
    mut reader: csv::Reader<R>,
    source: &Path,
    text_columns: &[&str],
) -> Result<Dataset, ClaimDataError> {
    let load_error = |e: csv::Error| ClaimDataError::data_load(source, e);

    let headers: Vec<String> = reader
        .headers()
        .map_err(load_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(load_error)?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(parse_missing(field));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| {
            let keep_text = text_columns.contains(&name.as_str());
            infer_column(name, values, keep_text)
        })
        .collect();

    // a repeated header makes the file itself malformed
    Dataset::new(columns).map_err(|e| ClaimDataError::data_load(source, e))
}

fn parse_missing(field: &str) -> Option<String> {
    if MISSING_MARKERS.contains(&field) {
        None
    } else {
        Some(field.to_string())
    }
}

fn infer_column(name: String, values: Vec<Option<String>>, keep_text: bool) -> Column {
    if !keep_text {
        let parsed: Option<Vec<Option<f64>>> = values
            .iter()
            .map(|v| match v {
                None => Some(None),
                Some(s) => s.parse::<f64>().ok().filter(|x| x.is_finite()).map(Some),
            })
            .collect();
        if let Some(numbers) = parsed {
            return Column::numeric(name, numbers);
        }
    }
    Column::text(name, values)
}

/// Projects a raw table onto the allow-list, drops rows without a severity
/// and casts the categorical columns
///
/// The returned report carries an empty `source`.
///
/// # Errors
///
/// `ClaimDataError::Schema` if the severity column is absent or not numeric
pub fn prepare_model_dataset(raw: &Dataset) -> Result<(Dataset, LoadReport), ClaimDataError> {
    let severity = raw.column(SEVERITY).ok_or_else(|| {
        ClaimDataError::schema(format!("required column '{SEVERITY}' is absent"))
    })?;
    if severity.kind() != ColumnKind::Numeric {
        return Err(ClaimDataError::schema(format!(
            "column '{SEVERITY}' must be numeric, found {}",
            severity.kind()
        )));
    }

    let absent_columns: Vec<String> = MODEL_COLUMNS
        .iter()
        .filter(|name| !raw.contains(name))
        .map(|name| name.to_string())
        .collect();
    for name in &absent_columns {
        debug!(column = %name, "Allow-listed column not present, skipping");
    }

    let projected = raw.project(&MODEL_COLUMNS);
    let severities = projected.numeric(SEVERITY)?;
    let mut dataset = projected.filter_rows(|row| severities[row].is_some());

    let dropped_rows = raw.n_rows() - dataset.n_rows();
    if dropped_rows > 0 {
        warn!(dropped_rows, "Dropped rows with missing {}", SEVERITY);
    }

    cast_categorical(&mut dataset, &CATEGORICAL_COLUMNS)?;

    let report = LoadReport {
        source: PathBuf::new(),
        raw_rows: raw.n_rows(),
        retained_rows: dataset.n_rows(),
        dropped_rows,
        columns: dataset.column_names().into_iter().map(str::to_string).collect(),
        absent_columns,
    };
    Ok((dataset, report))
}

/// Casts each named column that is present to categorical
///
/// Casting is idempotent; absent columns are skipped.
pub fn cast_categorical(dataset: &mut Dataset, names: &[&str]) -> Result<(), ClaimDataError> {
    for name in names {
        let Some(column) = dataset.column(name) else {
            continue;
        };
        if matches!(column.data(), ColumnData::Categorical(_)) {
            continue;
        }
        let cast = column.to_categorical();
        dataset.replace_column(cast)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
months_as_customer,age,policy_deductable,insured_sex,total_claim_amount,incident_city
328,48,1000,MALE,71610,Columbus
228,42,2000,MALE,,Riverwood
134,29,2000,FEMALE,34650,Columbus
256,41,NA,FEMALE,63400,Arlington
";

    fn sample() -> Dataset {
        read_table_from_reader(SAMPLE.as_bytes(), Path::new("sample.csv"), &CATEGORICAL_COLUMNS)
            .unwrap()
    }

    #[test]
    fn test_infers_numeric_and_text_columns() {
        let raw = sample();
        assert_eq!(raw.shape(), (4, 6));
        assert_eq!(raw.column("age").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(raw.column("insured_sex").unwrap().kind(), ColumnKind::Text);
        assert_eq!(raw.column("incident_city").unwrap().kind(), ColumnKind::Text);
        assert_eq!(raw.numeric("policy_deductable").unwrap()[3], None);
    }

    #[test]
    fn test_prepare_drops_missing_severity_and_projects() {
        let (ds, report) = prepare_model_dataset(&sample()).unwrap();
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(report.dropped_rows, 1);
        assert!(!ds.contains("incident_city"));
        assert!(report.absent_columns.contains(&"auto_year".to_string()));
        assert!(ds.numeric(SEVERITY).unwrap().iter().all(Option::is_some));
    }

    #[test]
    fn test_prepare_casts_categorical_columns() {
        let (ds, _) = prepare_model_dataset(&sample()).unwrap();
        let sex = ds.categorical("insured_sex").unwrap();
        assert_eq!(sex.levels(), &["FEMALE".to_string(), "MALE".to_string()]);
    }

    #[test]
    fn test_missing_severity_column_is_a_schema_error() {
        let raw = read_table_from_reader(
            "age,insured_sex\n30,MALE\n".as_bytes(),
            Path::new("x.csv"),
            &[],
        )
        .unwrap();
        let err = prepare_model_dataset(&raw).unwrap_err();
        assert!(matches!(err, ClaimDataError::Schema(_)));
    }

    #[test]
    fn test_text_severity_column_is_a_schema_error() {
        let raw = read_table_from_reader(
            "total_claim_amount\n100\nlots\n".as_bytes(),
            Path::new("x.csv"),
            &[],
        )
        .unwrap();
        assert!(matches!(
            prepare_model_dataset(&raw),
            Err(ClaimDataError::Schema(_))
        ));
    }

    #[test]
    fn test_ragged_rows_fail_to_load() {
        let result = read_table_from_reader(
            "a,b\n1,2\n3\n".as_bytes(),
            Path::new("ragged.csv"),
            &[],
        );
        assert!(matches!(result, Err(ClaimDataError::DataLoad { .. })));
    }

    #[test]
    fn test_cast_categorical_twice_is_a_no_op() {
        let (mut ds, _) = prepare_model_dataset(&sample()).unwrap();
        let before = ds.clone();
        cast_categorical(&mut ds, &CATEGORICAL_COLUMNS).unwrap();
        assert_eq!(ds, before);
    }
}
