use busplan::{repository::Stop, shared::geo::Coordinate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    pub key: String,
    pub name: String,
    pub coordinate: Coordinate,
}

impl From<&Stop> for StopDto {
    fn from(stop: &Stop) -> Self {
        Self {
            key: stop.key.to_string(),
            name: stop.name.to_string(),
            coordinate: stop.coordinate,
        }
    }
}
