use serde::{Deserialize, Serialize};

use crate::shared::FareTable;

/// Tuning knobs for terminal detection, route finding and graph search.
///
/// The defaults are tuned for a city bus network with a few thousand routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Routes with fewer stops are never offered as direct or candidate routes.
    pub min_route_length: usize,
    /// A stop is a terminal when it ends at least this many routes.
    pub terminal_threshold: usize,
    /// How many of the longest routes are always added to the search graph.
    pub top_route_count: usize,
    /// Paths needing more route changes than this are pruned.
    pub max_transfers: u32,
    /// Routes shorter than this pay `short_route_penalty` per edge while searching.
    pub short_route_length: usize,
    /// Ranking cost only, never part of a reported distance.
    pub short_route_penalty: f64,
    pub fares: FareTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_route_length: 15,
            terminal_threshold: 5,
            top_route_count: 50,
            max_transfers: 1,
            short_route_length: 25,
            short_route_penalty: 5.0,
            fares: FareTable::default(),
        }
    }
}

impl Config {
    pub fn with_min_route_length(mut self, min_route_length: usize) -> Self {
        self.min_route_length = min_route_length;
        self
    }

    pub fn with_terminal_threshold(mut self, terminal_threshold: usize) -> Self {
        self.terminal_threshold = terminal_threshold;
        self
    }

    pub fn with_top_route_count(mut self, top_route_count: usize) -> Self {
        self.top_route_count = top_route_count;
        self
    }

    pub fn with_max_transfers(mut self, max_transfers: u32) -> Self {
        self.max_transfers = max_transfers;
        self
    }

    pub fn with_short_route_penalty(mut self, length: usize, penalty: f64) -> Self {
        self.short_route_length = length;
        self.short_route_penalty = penalty;
        self
    }

    pub fn with_fares(mut self, fares: FareTable) -> Self {
        self.fares = fares;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.min_route_length, 15);
        assert_eq!(config.terminal_threshold, 5);
        assert_eq!(config.top_route_count, 50);
        assert_eq!(config.max_transfers, 1);
        assert_eq!(config.short_route_length, 25);
        assert_eq!(config.short_route_penalty, 5.0);
        assert_eq!(config.fares.fare_for_km(31.0), 32);
    }

    #[test]
    fn builder_config() {
        let config = Config::default()
            .with_min_route_length(3)
            .with_terminal_threshold(2)
            .with_top_route_count(10)
            .with_max_transfers(2)
            .with_short_route_penalty(8, 1.5);

        assert_eq!(config.min_route_length, 3);
        assert_eq!(config.terminal_threshold, 2);
        assert_eq!(config.top_route_count, 10);
        assert_eq!(config.max_transfers, 2);
        assert_eq!(config.short_route_length, 8);
        assert_eq!(config.short_route_penalty, 1.5);
    }
}
