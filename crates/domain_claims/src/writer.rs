//! Persists the modeling dataset

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use core_kernel::Dataset;

use crate::error::ClaimDataError;

/// Writes a dataset as comma-delimited text with a header row
///
/// Parent directories are created as needed. Categorical values are written
/// as their original labels and missing values as empty fields.
///
/// # Errors
///
/// Returns `ClaimDataError::Io` if the directory or file cannot be written
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<(), ClaimDataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ClaimDataError::io(parent, e))?;
    }

    let file = fs::File::create(path).map_err(|e| ClaimDataError::io(path, e))?;
    write_dataset_to(dataset, file).map_err(|e| ClaimDataError::io(path, e))?;

    info!(
        path = %path.display(),
        rows = dataset.n_rows(),
        columns = dataset.n_columns(),
        "Modeling dataset written"
    );
    Ok(())
}

/// Writes a dataset as comma-delimited text to any writer
pub fn write_dataset_to<W: Write>(dataset: &Dataset, writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(dataset.column_names())?;

    for row in 0..dataset.n_rows() {
        out.write_record(
            dataset
                .columns()
                .iter()
                .map(|c| c.data().render(row).unwrap_or_default()),
        )?;
    }
    out.flush()?;
    Ok(())
}
