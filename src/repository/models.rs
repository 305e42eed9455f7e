use std::sync::Arc;

use crate::{
    shared::{Identifiable, geo::Coordinate, normalize},
    table::TableRow,
};

/// One call of a route at a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct StopVisit {
    /// Global internal index, assigned when the repository is loaded.
    pub index: u32,
    pub route_id: Arc<str>,
    pub route_idx: u32,
    /// Display name exactly as given in the table.
    pub stop_name: Arc<str>,
    /// Normalized form of `stop_name`.
    pub stop_key: Arc<str>,
    pub stop_idx: u32,
    /// Position along the route, strictly increasing from first to last stop.
    pub sequence: u32,
    pub coordinate: Coordinate,
}

impl StopVisit {
    pub fn new(
        route_id: &str,
        stop_name: &str,
        sequence: u32,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            index: u32::MAX,
            route_id: route_id.trim().into(),
            route_idx: u32::MAX,
            stop_name: stop_name.trim().into(),
            stop_key: normalize(stop_name).into(),
            stop_idx: u32::MAX,
            sequence,
            coordinate: Coordinate::new(latitude, longitude),
        }
    }
}

impl From<TableRow> for StopVisit {
    fn from(value: TableRow) -> Self {
        Self::new(
            &value.route_id,
            &value.stop_name,
            value.sequence,
            value.latitude,
            value.longitude,
        )
    }
}

/// A physical stop, shared by every route calling at the same normalized name.
#[derive(Debug, Default, Clone)]
pub struct Stop {
    pub index: u32,
    /// The normalized stop name, used as the lookup key.
    pub key: Arc<str>,
    /// First display name seen for this key.
    pub name: Arc<str>,
    /// Coordinate of the first visit seen for this key.
    pub coordinate: Coordinate,
}

impl Identifiable for Stop {
    fn id(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn normalized_name(&self) -> &str {
        &self.key
    }
}

/// A bus route and its visits in travel order.
#[derive(Debug, Default, Clone)]
pub struct Route {
    pub index: u32,
    pub id: Arc<str>,
    /// Indexes into the repository visits, ordered by sequence.
    pub visits: Box<[u32]>,
}

impl Route {
    /// Number of stops the route calls at.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// The visit with the highest sequence.
    pub fn terminus(&self) -> Option<u32> {
        self.visits.last().copied()
    }
}
