use std::fs::OpenOptions;
use std::path::PathBuf;

use crate::error::Result;
use crate::model::LogRow;

/// Persisted column order, written once when the file is created.
pub const HEADER: [&str; 9] = [
    "Timestamp",
    "IP",
    "City",
    "Region",
    "Country",
    "User-Agent",
    "Timezone",
    "Language",
    "Screen Resolution",
];

/// Append-only CSV log of completed visits.
///
/// Each append opens, writes, flushes and closes the file; there is no
/// batching. Fields go through the csv codec, so commas and quotes in
/// user-controlled values survive the round trip.
#[derive(Clone)]
pub struct CsvLog {
    path: PathBuf,
}

impl CsvLog {
    /// Open the log, creating the file with its header row if absent.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(HEADER)?;
            writer.flush()?;
        }
        Ok(Self { path })
    }

    pub fn append(&self, row: &LogRow) -> Result<()> {
        let file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(row.fields())?;
        writer.flush()?;
        Ok(())
    }

    /// Read the whole log: header fields plus one Vec per data record.
    /// Returns None when the file does not exist.
    pub fn read_all(&self) -> Result<Option<(Vec<String>, Vec<Vec<String>>)>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        let mut records = reader.records();

        let header = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Ok(Some((Vec::new(), Vec::new()))),
        };

        let mut rows = Vec::new();
        for record in records {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Some((header, rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClientMetadata, GeoInfo, LogRow, VisitRecord};
    use tempfile::tempdir;

    fn sample_row(ua: &str) -> LogRow {
        let geo = GeoInfo {
            city: Some("Paris".to_string()),
            region: Some("IDF".to_string()),
            country: Some("FR".to_string()),
        };
        let visit = VisitRecord::new("1.2.3.4".to_string(), ua.to_string(), Some(geo));
        let client = ClientMetadata::new(
            Some("Europe/Paris".to_string()),
            Some("fr-FR".to_string()),
            Some("1920x1080".to_string()),
        );
        LogRow::new(visit, client)
    }

    #[test]
    fn test_creates_header_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");

        let log = CsvLog::new(&path).unwrap();
        log.append(&sample_row("TestAgent/1.0")).unwrap();

        // Reopening must not rewrite the header or clobber data
        let log = CsvLog::new(&path).unwrap();
        let (header, rows) = log.read_all().unwrap().unwrap();
        assert_eq!(header, HEADER);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = tempdir().unwrap();
        let log = CsvLog::new(dir.path().join("log.csv")).unwrap();

        log.append(&sample_row("TestAgent/1.0")).unwrap();
        let (_, rows) = log.read_all().unwrap().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1..], &["1.2.3.4", "Paris", "IDF", "FR", "TestAgent/1.0", "Europe/Paris", "fr-FR", "1920x1080"]);
    }

    #[test]
    fn test_comma_in_field_is_quoted() {
        let dir = tempdir().unwrap();
        let log = CsvLog::new(dir.path().join("log.csv")).unwrap();

        log.append(&sample_row("Mozilla/5.0 (X11, Linux)")).unwrap();
        let (_, rows) = log.read_all().unwrap().unwrap();
        assert_eq!(rows[0].len(), 9);
        assert_eq!(rows[0][5], "Mozilla/5.0 (X11, Linux)");
    }

    #[test]
    fn test_missing_file_reads_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let log = CsvLog::new(&path).unwrap();

        std::fs::remove_file(&path).unwrap();
        assert!(log.read_all().unwrap().is_none());
    }
}
