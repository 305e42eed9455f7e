use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
    sync::Arc,
};
use thiserror::Error;
use zip::ZipArchive;

mod config;
pub mod models;
pub use config::*;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("Malformed input row at line {line}: {reason}")]
    MalformedInputRow { line: u64, reason: String },
    #[error("Route {route_id} has more than one stop at sequence {sequence}")]
    DuplicateSequence { route_id: String, sequence: u32 },
}

#[derive(Default)]
pub enum StorageType {
    #[default]
    None,
    Csv(PathBuf),
    Zip(PathBuf),
    Buffer(Arc<[u8]>),
}

/// Source of stop table rows.
///
/// Rows are streamed in file order. The first malformed row aborts the stream.
#[derive(Default)]
pub struct TableReader {
    config: TableConfig,
    storage: StorageType,
}

impl TableReader {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_csv(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Csv(path);
        self
    }

    pub fn from_zip(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Zip(path);
        self
    }

    pub fn from_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.storage = StorageType::Buffer(bytes.into().into());
        self
    }

    pub fn stream_rows<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((u64, TableRow)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Csv(path) => stream_csv(File::open(path)?, self.config.delimiter, f),
            StorageType::Zip(path) => {
                let mut archive = ZipArchive::new(File::open(path)?)?;
                let index = archive
                    .index_for_name(&self.config.file_name)
                    .ok_or(self::Error::FileNotFound(self.config.file_name.clone()))?;
                let file = archive.by_index(index)?;
                stream_csv(file, self.config.delimiter, f)
            }
            StorageType::Buffer(bytes) => stream_csv(&bytes[..], self.config.delimiter, f),
        }
    }
}

fn stream_csv<R, F>(reader: R, delimiter: u8, mut f: F) -> Result<(), self::Error>
where
    R: Read,
    F: FnMut((u64, TableRow)),
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    for (i, result) in reader.records().enumerate() {
        // Header is line 1, so the first record is line 2 unless csv knows better.
        let fallback_line = i as u64 + 2;
        let record = result.map_err(|err| self::Error::MalformedInputRow {
            line: err
                .position()
                .map(|pos| pos.line())
                .unwrap_or(fallback_line),
            reason: err.to_string(),
        })?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(fallback_line);
        let row: TableRow =
            record
                .deserialize(Some(&headers))
                .map_err(|err| self::Error::MalformedInputRow {
                    line,
                    reason: err.to_string(),
                })?;
        row.validate(line)?;
        f((line, row));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(csv: &str) -> Result<Vec<(u64, TableRow)>, Error> {
        let mut rows = vec![];
        TableReader::new(TableConfig::default())
            .from_bytes(csv)
            .stream_rows(|row| rows.push(row))?;
        Ok(rows)
    }

    #[test]
    fn reads_aliased_columns() {
        let rows = collect(
            "route_no,stop_name,stop_sequence,lat,lon\n500D, Hebbal ,1,13.0358,77.5970\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        let (line, row) = &rows[0];
        assert_eq!(*line, 2);
        assert_eq!(row.route_id, "500D");
        assert_eq!(row.stop_name, "Hebbal");
        assert_eq!(row.sequence, 1);
    }

    #[test]
    fn rejects_non_numeric_coordinate() {
        let err = collect(
            "route_id,stop_name,sequence,latitude,longitude\n\
             500D,Hebbal,1,13.0358,77.5970\n\
             500D,Silk Board,2,north,77.6229\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedInputRow { line: 3, .. }));
    }

    #[test]
    fn rejects_missing_field() {
        let err = collect("route_id,stop_name,sequence,latitude\n500D,Hebbal,1,13.0358\n")
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInputRow { .. }));
    }

    #[test]
    fn rejects_empty_stop_name() {
        let err = collect("route_id,stop_name,sequence,latitude,longitude\n500D,,1,13.0,77.5\n")
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInputRow { line: 2, .. }));
    }

    #[test]
    fn empty_storage_yields_nothing() {
        let mut count = 0;
        TableReader::default()
            .stream_rows(|_| count += 1)
            .unwrap();
        assert_eq!(count, 0);
    }
}
