use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::repository::{Route, StopVisit};

/// Stops where many routes end, used as hubs when nothing better is known.
#[derive(Debug, Clone, Default)]
pub struct TerminalSet {
    stops: HashSet<u32>,
}

impl TerminalSet {
    /// A stop is a terminal when it is the last stop of at least
    /// `threshold` distinct routes.
    pub fn detect(routes: &[Route], visits: &[StopVisit], threshold: usize) -> Self {
        let termini: Vec<u32> = routes
            .par_iter()
            .filter_map(|route| route.terminus())
            .map(|visit_idx| visits[visit_idx as usize].stop_idx)
            .collect();

        let mut tally: HashMap<u32, usize> = HashMap::new();
        termini
            .into_iter()
            .for_each(|stop_idx| *tally.entry(stop_idx).or_default() += 1);

        let stops = tally
            .into_iter()
            .filter_map(|(stop_idx, count)| (count >= threshold).then_some(stop_idx))
            .collect();
        Self { stops }
    }

    pub fn contains(&self, stop_idx: u32) -> bool {
        self.stops.contains(&stop_idx)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.stops.iter().copied()
    }
}
