#![allow(dead_code)]

use busplan::prelude::*;
use std::sync::Arc;

/// Roughly one kilometer north per step.
pub const STEP: f64 = 0.009;

/// A named stop with its position.
pub type Place = (String, f64, f64);

/// `count` stops named `{prefix} {i}`, laid out in a straight line.
pub fn corridor(prefix: &str, count: usize, origin: (f64, f64), step: (f64, f64)) -> Vec<Place> {
    (0..count)
        .map(|i| {
            (
                format!("{prefix} {i}"),
                origin.0 + step.0 * i as f64,
                origin.1 + step.1 * i as f64,
            )
        })
        .collect()
}

pub fn place(name: &str, latitude: f64, longitude: f64) -> Place {
    (name.to_string(), latitude, longitude)
}

/// Visits of one route calling at `places` in order, sequence starting at 1.
pub fn route(route_id: &str, places: &[Place]) -> Vec<StopVisit> {
    places
        .iter()
        .enumerate()
        .map(|(i, (name, lat, lon))| StopVisit::new(route_id, name, i as u32 + 1, *lat, *lon))
        .collect()
}

pub fn reversed(places: &[Place]) -> Vec<Place> {
    places.iter().rev().cloned().collect()
}

/// Sum of great-circle hops between consecutive places.
pub fn path_km(places: &[Place]) -> f64 {
    places
        .windows(2)
        .map(|pair| great_circle_km(pair[0].1, pair[0].2, pair[1].1, pair[1].2))
        .sum()
}

pub fn build(config: Config, visits: Vec<StopVisit>) -> Repository {
    Repository::new()
        .with_config(config)
        .load_visits(visits)
        .expect("Failed to build repository")
}

pub fn assert_km(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected} km, got {actual} km"
    );
}

pub fn ids(routes: &[Arc<str>]) -> Vec<&str> {
    routes.iter().map(|id| &**id).collect()
}
