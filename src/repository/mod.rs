use rayon::prelude::*;
use std::{collections::HashMap, sync::Arc, time::Instant};
use tracing::debug;

mod models;
mod terminals;
pub use models::*;
pub use terminals::*;

use crate::{
    config::Config,
    planner::{self, PlanResult, Planner, direct},
    shared::{self, normalize},
    table::{self, TableReader},
};

/// Immutable stop table plus the indexes derived from it.
///
/// Build it once with [`Repository::load_table`] or [`Repository::load_visits`]
/// and share it between requests; nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub stops: Box<[Stop]>,
    pub routes: Box<[Route]>,
    pub visits: Box<[StopVisit]>,

    stop_lookup: HashMap<Arc<str>, u32>,
    route_lookup: HashMap<Arc<str>, u32>,
    stop_to_routes: Box<[Box<[u32]>]>,
    terminals: TerminalSet,
    config: Config,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the configuration. Terminals are re-detected if data is loaded.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        if !self.routes.is_empty() {
            self.generate_terminals();
        }
        self
    }

    pub fn load_table(self, reader: TableReader) -> Result<Self, table::Error> {
        debug!("Reading stop table...");
        let now = Instant::now();
        let mut visits: Vec<StopVisit> = Vec::new();
        reader.stream_rows(|(_, row)| visits.push(row.into()))?;
        debug!("Reading {} rows took {:?}", visits.len(), now.elapsed());
        self.load_visits(visits)
    }

    pub fn load_visits<I>(mut self, visits: I) -> Result<Self, table::Error>
    where
        I: IntoIterator<Item = StopVisit>,
    {
        let visits: Vec<StopVisit> = visits.into_iter().collect();
        // In-memory rows report their 1-based position as the line.
        for (i, visit) in visits.iter().enumerate() {
            if visit.route_id.is_empty() || visit.stop_key.is_empty() {
                return Err(table::Error::MalformedInputRow {
                    line: i as u64 + 1,
                    reason: "route_id and stop_name must not be empty".into(),
                });
            }
            if !visit.coordinate.is_finite() {
                return Err(table::Error::MalformedInputRow {
                    line: i as u64 + 1,
                    reason: "coordinate is not a finite number".into(),
                });
            }
        }
        self.load_routes(visits)?;
        self.load_stops();
        self.generate_stop_to_routes();
        self.generate_terminals();
        Ok(self)
    }

    fn load_routes(&mut self, mut visits: Vec<StopVisit>) -> Result<(), table::Error> {
        debug!("Loading routes...");
        let now = Instant::now();
        // Route indexes follow route id order so index order is id order.
        visits.par_sort_by(|a, b| {
            a.route_id
                .cmp(&b.route_id)
                .then_with(|| a.sequence.cmp(&b.sequence))
        });

        if let Some(pair) = visits.windows(2).find(|pair| {
            pair[0].route_id == pair[1].route_id && pair[0].sequence == pair[1].sequence
        }) {
            return Err(table::Error::DuplicateSequence {
                route_id: pair[0].route_id.to_string(),
                sequence: pair[0].sequence,
            });
        }

        let mut routes: Vec<Route> = Vec::new();
        let mut route_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut buffer: Vec<u32> = Vec::new();
        for i in 0..visits.len() {
            let route_idx = routes.len() as u32;
            let visit = &mut visits[i];
            visit.index = i as u32;
            visit.route_idx = route_idx;
            buffer.push(i as u32);

            let is_last = visits
                .get(i + 1)
                .is_none_or(|next| next.route_id != visits[i].route_id);
            if is_last {
                let id = visits[i].route_id.clone();
                route_lookup.insert(id.clone(), route_idx);
                routes.push(Route {
                    index: route_idx,
                    id,
                    visits: std::mem::take(&mut buffer).into(),
                });
            }
        }

        self.visits = visits.into();
        self.routes = routes.into();
        self.route_lookup = route_lookup;
        debug!(
            "Loading {} routes took {:?}",
            self.routes.len(),
            now.elapsed()
        );
        Ok(())
    }

    fn load_stops(&mut self) {
        debug!("Loading stops...");
        let now = Instant::now();
        let mut stop_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut stops: Vec<Stop> = Vec::new();
        let mut visits = std::mem::take(&mut self.visits).into_vec();
        visits.iter_mut().for_each(|visit| {
            let stop_idx = *stop_lookup.entry(visit.stop_key.clone()).or_insert_with(|| {
                let index = stops.len() as u32;
                stops.push(Stop {
                    index,
                    key: visit.stop_key.clone(),
                    name: visit.stop_name.clone(),
                    coordinate: visit.coordinate,
                });
                index
            });
            visit.stop_idx = stop_idx;
        });
        self.visits = visits.into();
        self.stops = stops.into();
        self.stop_lookup = stop_lookup;
        debug!("Loading {} stops took {:?}", self.stops.len(), now.elapsed());
    }

    fn generate_stop_to_routes(&mut self) {
        let mut stop_to_routes: Vec<Vec<u32>> = vec![Vec::new(); self.stops.len()];
        // Visits are grouped by route in index order, so each list stays sorted.
        self.visits.iter().for_each(|visit| {
            let routes = &mut stop_to_routes[visit.stop_idx as usize];
            if routes.last() != Some(&visit.route_idx) {
                routes.push(visit.route_idx);
            }
        });
        self.stop_to_routes = stop_to_routes.into_iter().map(|val| val.into()).collect();
    }

    fn generate_terminals(&mut self) {
        debug!("Detecting terminals...");
        let now = Instant::now();
        self.terminals =
            TerminalSet::detect(&self.routes, &self.visits, self.config.terminal_threshold);
        debug!(
            "Detecting {} terminals took {:?}",
            self.terminals.len(),
            now.elapsed()
        );
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn terminals(&self) -> &TerminalSet {
        &self.terminals
    }

    /// Keys of every terminal stop, sorted.
    pub fn terminal_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .terminals
            .iter()
            .map(|stop_idx| &*self.stops[stop_idx as usize].key)
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn is_terminal(&self, stop_idx: u32) -> bool {
        self.terminals.contains(stop_idx)
    }

    /// Get a stop by its normalized key.
    pub fn stop_by_key(&self, key: &str) -> Option<&Stop> {
        let index = self.stop_lookup.get(key)?;
        Some(&self.stops[*index as usize])
    }

    /// Get a stop by any spelling of its name that normalizes to a known key.
    pub fn stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stop_by_key(&normalize(name))
    }

    pub fn route_by_id(&self, id: &str) -> Option<&Route> {
        let index = self.route_lookup.get(id)?;
        Some(&self.routes[*index as usize])
    }

    /// Routes calling at the stop, in route id order.
    pub fn routes_by_stop_idx(&self, stop_idx: u32) -> &[u32] {
        &self.stop_to_routes[stop_idx as usize]
    }

    pub fn visits_by_route_idx(&self, route_idx: u32) -> impl Iterator<Item = &StopVisit> + '_ {
        self.routes[route_idx as usize]
            .visits
            .iter()
            .map(|visit_idx| &self.visits[*visit_idx as usize])
    }

    /// Position of the first call at `stop_idx` along the route.
    pub fn position_in_route(&self, route_idx: u32, stop_idx: u32) -> Option<usize> {
        self.visits_by_route_idx(route_idx)
            .position(|visit| visit.stop_idx == stop_idx)
    }

    /// Every stop display name, sorted and deduplicated.
    pub fn stop_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stops.iter().map(|stop| &*stop.name).collect();
        names.par_sort_unstable();
        names.dedup();
        names
    }

    /// Does a fuzzy search on all the stops, comparing their name to the needle.
    pub fn search_stops_by_name<'a>(&'a self, needle: &str) -> Vec<&'a Stop> {
        shared::search(needle, &self.stops)
    }

    /// Strict direct routes between two stop names. Unknown stops yield no routes.
    pub fn list_direct_routes(&self, from: &str, to: &str) -> Vec<Arc<str>> {
        match (self.stop_by_name(from), self.stop_by_name(to)) {
            (Some(from), Some(to)) => {
                self.route_ids(direct::find_strict_direct(self, from.index, to.index))
            }
            _ => Vec::new(),
        }
    }

    /// Every route that plausibly serves the pair, directly or through a terminal.
    pub fn list_candidate_routes(&self, from: &str, to: &str) -> Vec<Arc<str>> {
        match (self.stop_by_name(from), self.stop_by_name(to)) {
            (Some(from), Some(to)) => {
                self.route_ids(direct::find_all_candidates(self, from.index, to.index))
            }
            _ => Vec::new(),
        }
    }

    pub(crate) fn route_ids(&self, route_idxs: Vec<u32>) -> Vec<Arc<str>> {
        route_idxs
            .into_iter()
            .map(|route_idx| self.routes[route_idx as usize].id.clone())
            .collect()
    }

    pub fn planner(&self, from: &str, to: &str) -> Result<Planner<'_>, planner::Error> {
        Planner::new(self, from, to)
    }

    pub fn plan(&self, from: &str, to: &str) -> Result<PlanResult, planner::Error> {
        self.planner(from, to)?.solve()
    }
}
