use serde::{Deserialize, Serialize};

use crate::table;

/// One row of the stop-level table as found on disk.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TableRow {
    #[serde(alias = "route_no")]
    pub route_id: String,
    pub stop_name: String,
    #[serde(alias = "stop_sequence")]
    pub sequence: u32,
    #[serde(alias = "lat", alias = "stop_lat")]
    pub latitude: f64,
    #[serde(alias = "lon", alias = "lng", alias = "stop_lon")]
    pub longitude: f64,
}

impl TableRow {
    pub(crate) fn validate(&self, line: u64) -> Result<(), table::Error> {
        let reason = if self.route_id.trim().is_empty() {
            "route_id is empty"
        } else if self.stop_name.trim().is_empty() {
            "stop_name is empty"
        } else if !self.latitude.is_finite() || !self.longitude.is_finite() {
            "coordinate is not a finite number"
        } else {
            return Ok(());
        };
        Err(table::Error::MalformedInputRow {
            line,
            reason: reason.into(),
        })
    }
}
