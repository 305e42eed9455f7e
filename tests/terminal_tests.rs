mod common;

use busplan::prelude::*;
use common::*;

/// `count` two-stop routes named `{prefix}{i}` that all end at `end`.
fn feeders(prefix: &str, count: usize, end: &Place) -> Vec<StopVisit> {
    (0..count)
        .flat_map(|i| {
            let start = place(&format!("{prefix} start {i}"), 12.0 + i as f64 * STEP, 77.0);
            route(&format!("{prefix}{i}"), &[start, end.clone()])
        })
        .collect()
}

#[test]
fn terminal_threshold_test() {
    let depot = place("Depot", 13.0, 77.5);
    let yard = place("Yard", 13.5, 77.5);
    let mut visits = feeders("D", 5, &depot);
    visits.extend(feeders("Y", 4, &yard));
    let repository = build(Config::default(), visits);

    assert_eq!(repository.terminal_keys(), vec!["depot"]);
    let depot = repository.stop_by_name("Depot").unwrap();
    let yard = repository.stop_by_name("Yard").unwrap();
    assert!(repository.is_terminal(depot.index));
    assert!(!repository.is_terminal(yard.index));
}

#[test]
fn terminal_counts_last_stop_only_test() {
    // Passing through a stop does not count towards it being a terminal.
    let hub = place("Hub", 13.0, 77.5);
    let mut visits = Vec::new();
    for i in 0..6 {
        let start = place(&format!("Start {i}"), 12.0 + i as f64 * STEP, 77.0);
        let end = place(&format!("End {i}"), 14.0 + i as f64 * STEP, 77.0);
        visits.extend(route(&format!("R{i}"), &[start, hub.clone(), end]));
    }
    let repository = build(Config::default(), visits);
    assert!(repository.terminals().is_empty());
}

#[test]
fn terminal_threshold_from_config_test() {
    let yard = place("Yard", 13.5, 77.5);
    let repository = build(
        Config::default().with_terminal_threshold(4),
        feeders("Y", 4, &yard),
    );
    assert_eq!(repository.terminal_keys(), vec!["yard"]);

    let repository = repository.with_config(Config::default());
    assert!(repository.terminal_keys().is_empty());
}
