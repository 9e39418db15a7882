use crate::{
    error::{Result, SynthError},
    models::{PricePoint, PriceSeries},
    utils::{log_export, Logger, Timer},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{Read, Write},
    path::{Path, PathBuf},
};

pub const CSV_MIME_TYPE: &str = "text/csv";

/// One exported row; the index column is omitted
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "MA")]
    ma: Option<f64>,
}

impl From<&PricePoint> for CsvRow {
    fn from(point: &PricePoint) -> Self {
        Self {
            date: point.date,
            close: point.close,
            ma: point.ma,
        }
    }
}

impl From<CsvRow> for PricePoint {
    fn from(row: CsvRow) -> Self {
        Self {
            date: row.date,
            close: row.close,
            ma: row.ma,
        }
    }
}

/// Download file name for a ticker's export
pub fn export_file_name(ticker: &str) -> String {
    format!("{}_stock_data.csv", ticker)
}

/// Write `Date,Close,MA` rows with a header; undefined MA is an empty field
pub fn write_csv<W: Write>(series: &PriceSeries, writer: W) -> Result<W> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in &series.points {
        csv_writer.serialize(CsvRow::from(point))?;
    }
    csv_writer
        .into_inner()
        .map_err(|e| SynthError::Io(e.into_error()))
}

/// UTF-8 CSV bytes of the full series
pub fn to_csv_bytes(series: &PriceSeries) -> Result<Vec<u8>> {
    write_csv(series, Vec::new())
}

/// Read an export back into price points
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<PricePoint>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut points = Vec::new();
    for row in csv_reader.deserialize::<CsvRow>() {
        points.push(row?.into());
    }
    Ok(points)
}

/// Writes series exports into a directory
pub struct CsvExportService {
    output_dir: PathBuf,
    logger: Logger,
}

impl CsvExportService {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            logger: Logger::new("CSV_EXPORT"),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export to `{output_dir}/{TICKER}_stock_data.csv`
    pub fn export(&self, series: &PriceSeries) -> Result<PathBuf> {
        let path = self.output_dir.join(export_file_name(&series.ticker));
        self.export_to(series, &path)?;
        Ok(path)
    }

    /// Export to an explicit path
    pub fn export_to(&self, series: &PriceSeries, path: &Path) -> Result<()> {
        let timer = Timer::start("csv export");
        let file = File::create(path)?;
        let mut file = write_csv(series, file)?;
        file.flush()?;

        let now = chrono::Utc::now();
        log_export(&format!(
            "💾 [{}] Wrote {} rows for {} to {} ({:.1}ms)",
            now.format("%Y-%m-%d %H:%M:%S UTC"),
            series.len(),
            series.ticker,
            path.display(),
            timer.elapsed_ms()
        ));
        self.logger.debug(&format!("export window: {}", series.window));

        Ok(())
    }
}
