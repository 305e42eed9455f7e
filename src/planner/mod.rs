pub mod direct;
pub mod graph;
pub mod itinerary;
pub mod search;

pub use itinerary::*;

use std::{collections::BTreeSet, sync::Arc, time::Instant};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    planner::{
        graph::RouteGraph,
        search::{Outcome, Search},
    },
    repository::{Repository, Stop},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Stop {0:?} does not match any entry")]
    StopNotFound(String),
    #[error("Could not find a route")]
    NoRouteFound,
}

/// Plans a single journey between two stops.
///
/// Tries a direct route first and falls back to a transfer-capped search over
/// a pruned route graph.
pub struct Planner<'a> {
    repository: &'a Repository,
    from: &'a Stop,
    to: &'a Stop,
}

impl<'a> Planner<'a> {
    pub fn new(repository: &'a Repository, from: &str, to: &str) -> Result<Self, self::Error> {
        let from = repository
            .stop_by_name(from)
            .ok_or_else(|| self::Error::StopNotFound(from.to_string()))?;
        let to = repository
            .stop_by_name(to)
            .ok_or_else(|| self::Error::StopNotFound(to.to_string()))?;
        Ok(Self {
            repository,
            from,
            to,
        })
    }

    pub fn solve(self) -> Result<PlanResult, self::Error> {
        let candidates =
            direct::find_all_candidates(self.repository, self.from.index, self.to.index);
        let candidate_route_ids = self.repository.route_ids(candidates.clone());

        if let Some(result) = self.solve_direct(&candidates, candidate_route_ids.clone()) {
            return Ok(result);
        }
        self.solve_graph(candidate_route_ids)
    }

    /// The longest candidate that calls at the destination after the source,
    /// lowest id on ties.
    fn solve_direct(
        &self,
        candidates: &[u32],
        candidate_route_ids: Vec<Arc<str>>,
    ) -> Option<PlanResult> {
        let (route_idx, from_pos, to_pos) = candidates
            .iter()
            .filter_map(|&route_idx| {
                let from_pos = self.repository.position_in_route(route_idx, self.from.index)?;
                let to_pos = self.repository.position_in_route(route_idx, self.to.index)?;
                (to_pos > from_pos).then_some((route_idx, from_pos, to_pos))
            })
            .max_by(|(a, ..), (b, ..)| {
                let a_len = self.repository.routes[*a as usize].len();
                let b_len = self.repository.routes[*b as usize].len();
                a_len.cmp(&b_len).then_with(|| b.cmp(a))
            })?;

        debug!(
            "Direct route {} from {} to {}",
            self.repository.routes[route_idx as usize].id, self.from.name, self.to.name
        );
        let segment = Segment::along_route(self.repository, route_idx, from_pos, to_pos);
        let distance = segment.distance;
        Some(PlanResult::new(
            self.repository,
            vec![segment],
            distance,
            Arrival::Destination,
            candidate_route_ids,
        ))
    }

    fn solve_graph(&self, candidate_route_ids: Vec<Arc<str>>) -> Result<PlanResult, self::Error> {
        let now = Instant::now();
        let routes = self.search_routes();
        let graph = RouteGraph::build(self.repository, &routes);
        debug!(
            "Built graph of {} routes, {} nodes and {} edges in {:?}",
            routes.len(),
            graph.len(),
            graph.edge_count(),
            now.elapsed()
        );

        let mut search = Search::new(self.repository, &graph);
        let outcome = search.run(self.from.index, self.to.index);
        debug!("Graph search took {:?}", now.elapsed());

        let (end, arrival) = match outcome {
            Some(Outcome::Destination(end)) => (end, Arrival::Destination),
            Some(Outcome::Terminal(end)) => {
                let terminal = &self.repository.stops[graph.node(end).stop_idx as usize];
                warn!(
                    "No path from {} to {}, ending at terminal {}",
                    self.from.name, self.to.name, terminal.name
                );
                (end, Arrival::Terminal(terminal.name.clone()))
            }
            None => return Err(self::Error::NoRouteFound),
        };

        Ok(PlanResult::from_search(
            self.repository,
            &graph,
            &search,
            end,
            arrival,
            candidate_route_ids,
        ))
    }

    /// Routes at either end plus the network's longest routes.
    fn search_routes(&self) -> BTreeSet<u32> {
        let mut routes: BTreeSet<u32> = BTreeSet::new();
        routes.extend(self.repository.routes_by_stop_idx(self.from.index));
        routes.extend(self.repository.routes_by_stop_idx(self.to.index));

        let mut longest: Vec<u32> = self.repository.routes.iter().map(|r| r.index).collect();
        longest.sort_by(|a, b| {
            let a_len = self.repository.routes[*a as usize].len();
            let b_len = self.repository.routes[*b as usize].len();
            b_len.cmp(&a_len).then_with(|| a.cmp(b))
        });
        routes.extend(longest.into_iter().take(self.repository.config().top_route_count));
        routes
    }
}
