use busplan::planner::{Arrival, PlanResult, Segment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentDto {
    pub route_id: String,
    pub from: String,
    pub to: String,
    pub stops: Vec<String>,
    pub distance_km: f64,
}

impl From<Segment> for SegmentDto {
    fn from(segment: Segment) -> Self {
        Self {
            route_id: segment.route_id.to_string(),
            from: segment.from.to_string(),
            to: segment.to.to_string(),
            stops: segment.stops.iter().map(|stop| stop.to_string()).collect(),
            distance_km: segment.distance.as_kilometers(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "stop", rename_all = "snake_case")]
pub enum ArrivalDto {
    Destination,
    Terminal(String),
}

impl From<Arrival> for ArrivalDto {
    fn from(arrival: Arrival) -> Self {
        match arrival {
            Arrival::Destination => Self::Destination,
            Arrival::Terminal(stop) => Self::Terminal(stop.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanDto {
    pub segments: Vec<SegmentDto>,
    pub distance_km: f64,
    pub transfer_count: usize,
    pub fare: u32,
    pub candidate_route_ids: Vec<String>,
    pub arrival: ArrivalDto,
}

impl From<PlanResult> for PlanDto {
    fn from(result: PlanResult) -> Self {
        Self {
            segments: result.segments.into_iter().map(SegmentDto::from).collect(),
            distance_km: result.distance.as_kilometers(),
            transfer_count: result.transfer_count,
            fare: result.fare,
            candidate_route_ids: result
                .candidate_route_ids
                .iter()
                .map(|id| id.to_string())
                .collect(),
            arrival: result.arrival.into(),
        }
    }
}
