use busplan::prelude::SurveyResponse;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Survey form body; the timestamp is set by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyDto {
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub selected_routes: Vec<String>,
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

impl SurveyDto {
    pub fn into_response_record(self) -> SurveyResponse {
        SurveyResponse {
            timestamp: Local::now(),
            source: self.source,
            destination: self.destination,
            selected_routes: self.selected_routes,
            other_route: self.other_route,
            wait_time: self.wait_time,
            frequency: self.frequency,
            transfers: self.transfers,
            intermediate_stops: self.intermediate_stops,
        }
    }
}
