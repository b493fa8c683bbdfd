use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::batch::ResultRow;
use crate::input::{ID_COLUMN, URL_COLUMN};
use crate::metrics::METRIC_COLUMNS;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write results: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to create results file: {0}")]
    Io(#[from] std::io::Error),
}

/// The 15 output columns: id, url, then the metrics in order.
pub fn header() -> Vec<&'static str> {
    [ID_COLUMN, URL_COLUMN]
        .into_iter()
        .chain(METRIC_COLUMNS)
        .collect()
}

pub fn write_results(path: &Path, rows: &[ResultRow]) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_to(File::create(path)?, rows)
}

/// The header is written even with no rows.
pub fn write_to<W: Write>(out: W, rows: &[ResultRow]) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header())?;
    for row in rows {
        let mut record = vec![row.entry.id.clone(), row.entry.url.clone()];
        record.extend(row.outcome.metrics().to_record());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
