use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// One commuter's answer about a regular journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub timestamp: DateTime<Local>,
    pub source: String,
    pub destination: String,
    pub selected_routes: Vec<String>,
    /// A route the commuter takes that was not offered.
    #[serde(default)]
    pub other_route: String,
    #[serde(default)]
    pub wait_time: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub transfers: String,
    #[serde(default)]
    pub intermediate_stops: String,
}

/// Flat row written by sinks; list fields are joined with commas.
#[derive(Debug, Serialize)]
struct SurveyRecord<'a> {
    timestamp: String,
    source: &'a str,
    destination: &'a str,
    selected_routes: String,
    other_route: &'a str,
    wait_time: &'a str,
    frequency: &'a str,
    transfers: &'a str,
    intermediate_stops: &'a str,
}

impl<'a> From<&'a SurveyResponse> for SurveyRecord<'a> {
    fn from(value: &'a SurveyResponse) -> Self {
        Self {
            timestamp: value.timestamp.to_rfc3339(),
            source: &value.source,
            destination: &value.destination,
            selected_routes: value.selected_routes.join(","),
            other_route: &value.other_route,
            wait_time: &value.wait_time,
            frequency: &value.frequency,
            transfers: &value.transfers,
            intermediate_stops: &value.intermediate_stops,
        }
    }
}

/// Append-only destination for survey responses.
///
/// Implementations do not retry; a failed append is returned to the caller.
pub trait ResponseSink {
    fn append(&mut self, response: &SurveyResponse) -> Result<(), self::Error>;
}

/// Writes one csv row per response.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    header_pending: bool,
}

impl<W: Write> CsvSink<W> {
    /// A sink that writes the header before its first row.
    pub fn from_writer(writer: W) -> Self {
        Self::new(writer, true)
    }

    fn new(writer: W, header_pending: bool) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer),
            header_pending,
        }
    }

    pub fn into_inner(self) -> Result<W, self::Error> {
        self.writer
            .into_inner()
            .map_err(|err| self::Error::Io(err.into_error()))
    }
}

impl CsvSink<File> {
    /// Opens `path` for appending; the header is only written to an empty file.
    pub fn append_to<P: AsRef<Path>>(path: P) -> Result<Self, self::Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;
        Ok(Self::new(file, is_empty))
    }
}

impl<W: Write> ResponseSink for CsvSink<W> {
    fn append(&mut self, response: &SurveyResponse) -> Result<(), self::Error> {
        if self.header_pending {
            self.writer.write_record([
                "timestamp",
                "source",
                "destination",
                "selected_routes",
                "other_route",
                "wait_time",
                "frequency",
                "transfers",
                "intermediate_stops",
            ])?;
            self.header_pending = false;
        }
        self.writer.serialize(SurveyRecord::from(response))?;
        self.writer.flush()?;
        debug!(
            "Saved survey response {} -> {}",
            response.source, response.destination
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(source: &str, routes: &[&str]) -> SurveyResponse {
        SurveyResponse {
            timestamp: Local::now(),
            source: source.into(),
            destination: "Silk Board".into(),
            selected_routes: routes.iter().map(|r| r.to_string()).collect(),
            other_route: String::new(),
            wait_time: "5-10 min".into(),
            frequency: "Every 10-20 minutes".into(),
            transfers: "Direct (0)".into(),
            intermediate_stops: "Dairy Circle, Madiwala".into(),
        }
    }

    #[test]
    fn header_written_once() {
        let mut sink = CsvSink::from_writer(vec![]);
        sink.append(&response("Majestic", &["500D", "G-4"])).unwrap();
        sink.append(&response("Hebbal", &["500D"])).unwrap();
        let written = String::from_utf8(sink.into_inner().unwrap()).unwrap();

        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("timestamp,source,destination"));
        assert_eq!(
            written.matches("timestamp,source,destination").count(),
            1
        );
        assert!(lines[1].contains("Majestic,Silk Board,\"500D,G-4\""));
        assert!(lines[2].contains("Hebbal,Silk Board,500D,"));
    }

    #[test]
    fn free_text_is_quoted() {
        let mut sink = CsvSink::from_writer(vec![]);
        sink.append(&response("Majestic", &[])).unwrap();
        let written = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert!(written.contains("\"Dairy Circle, Madiwala\""));
    }
}
