use std::sync::Arc;

use crate::{
    planner::{
        graph::{Edge, RouteGraph},
        search::{Label, Search},
    },
    repository::Repository,
    shared::geo::Distance,
};

/// One uninterrupted ride on a single route, stops inclusive in travel order.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub route_id: Arc<str>,
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub stops: Vec<Arc<str>>,
    pub distance: Distance,
}

/// Where a plan ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arrival {
    /// The plan reaches the requested destination.
    Destination,
    /// The destination was unreachable within the transfer cap; the plan ends
    /// at this terminal instead.
    Terminal(Arc<str>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    pub segments: Vec<Segment>,
    pub distance: Distance,
    pub transfer_count: usize,
    pub fare: u32,
    /// Every route that plausibly serves the pair, whichever one was chosen.
    pub candidate_route_ids: Vec<Arc<str>>,
    pub arrival: Arrival,
}

impl PlanResult {
    /// True when the plan stops short of the requested destination.
    pub fn is_partial(&self) -> bool {
        !matches!(self.arrival, Arrival::Destination)
    }

    pub fn route_ids(&self) -> Vec<&str> {
        self.segments
            .iter()
            .map(|segment| &*segment.route_id)
            .collect()
    }
}

impl Segment {
    /// Ride on `route_idx` between two positions of the route, both inclusive.
    pub fn along_route(
        repository: &Repository,
        route_idx: u32,
        from_pos: usize,
        to_pos: usize,
    ) -> Self {
        let visits: Vec<_> = repository
            .visits_by_route_idx(route_idx)
            .skip(from_pos)
            .take(to_pos + 1 - from_pos)
            .collect();
        let distance = visits
            .windows(2)
            .map(|pair| pair[0].coordinate.great_circle_distance(&pair[1].coordinate))
            .sum();
        let stops: Vec<Arc<str>> = visits
            .iter()
            .map(|visit| repository.stops[visit.stop_idx as usize].name.clone())
            .collect();
        Self {
            route_id: repository.routes[route_idx as usize].id.clone(),
            from: stops.first().cloned().unwrap_or_default(),
            to: stops.last().cloned().unwrap_or_default(),
            stops,
            distance,
        }
    }

    /// Splits a searched path into rides, starting a new one on every route change.
    /// Rides that never leave their first stop are dropped.
    pub fn from_path(
        repository: &Repository,
        graph: &RouteGraph,
        path: &[(u32, Option<Edge>)],
    ) -> Vec<Self> {
        let mut segments: Vec<Segment> = vec![];
        let mut current: Option<(u32, Segment)> = None;
        for (node_idx, edge) in path.iter() {
            let node = graph.node(*node_idx);
            let name = repository.stops[node.stop_idx as usize].name.clone();
            match current.as_mut() {
                Some((route_idx, segment)) if *route_idx == node.route_idx => {
                    segment.to = name.clone();
                    segment.stops.push(name);
                    segment.distance += edge.map(|edge| edge.distance()).unwrap_or_default();
                }
                _ => {
                    if let Some((_, segment)) = current.take() {
                        segments.push(segment);
                    }
                    current = Some((
                        node.route_idx,
                        Segment {
                            route_id: repository.routes[node.route_idx as usize].id.clone(),
                            from: name.clone(),
                            to: name.clone(),
                            stops: vec![name],
                            distance: Distance::ZERO,
                        },
                    ));
                }
            }
        }
        if let Some((_, segment)) = current {
            segments.push(segment);
        }
        segments.retain(|segment| segment.stops.len() > 1);
        segments
    }
}

impl PlanResult {
    pub(crate) fn from_search(
        repository: &Repository,
        graph: &RouteGraph,
        search: &Search,
        end: u32,
        arrival: Arrival,
        candidate_route_ids: Vec<Arc<str>>,
    ) -> Self {
        let segments = Segment::from_path(repository, graph, &search.path(end));
        let Label { distance, .. } = search.label(end).unwrap_or_default();
        Self::new(repository, segments, distance, arrival, candidate_route_ids)
    }

    pub(crate) fn new(
        repository: &Repository,
        segments: Vec<Segment>,
        distance: Distance,
        arrival: Arrival,
        candidate_route_ids: Vec<Arc<str>>,
    ) -> Self {
        Self {
            transfer_count: segments.len().saturating_sub(1),
            fare: repository.config().fares.fare(distance),
            segments,
            distance,
            candidate_route_ids,
            arrival,
        }
    }
}
