use std::collections::HashSet;

use crate::repository::Repository;

/// Routes that call at `from` and later at `to`, long enough to be trunk routes.
///
/// Result is in route id order.
pub fn find_strict_direct(repository: &Repository, from: u32, to: u32) -> Vec<u32> {
    let min_len = repository.config().min_route_length;
    repository
        .routes_by_stop_idx(from)
        .iter()
        .copied()
        .filter(|&route_idx| repository.routes[route_idx as usize].len() >= min_len)
        .filter(|&route_idx| {
            match (
                repository.position_in_route(route_idx, from),
                repository.position_in_route(route_idx, to),
            ) {
                (Some(from_pos), Some(to_pos)) => to_pos > from_pos,
                _ => false,
            }
        })
        .collect()
}

/// Routes from `from` that either reach `to` later on or reach a terminal
/// after `from`.
///
/// A route that calls at `to` only before `from` still qualifies through a
/// later terminal. Result is in route id order.
pub fn find_all_candidates(repository: &Repository, from: u32, to: u32) -> Vec<u32> {
    let min_len = repository.config().min_route_length;
    repository
        .routes_by_stop_idx(from)
        .iter()
        .copied()
        .filter(|&route_idx| repository.routes[route_idx as usize].len() >= min_len)
        .filter(|&route_idx| {
            let Some(from_pos) = repository.position_in_route(route_idx, from) else {
                return false;
            };
            let reaches_to = repository
                .position_in_route(route_idx, to)
                .is_some_and(|to_pos| to_pos > from_pos);
            reaches_to || reaches_terminal_after(repository, route_idx, from_pos)
        })
        .collect()
}

/// Whether a terminal's first call on the route comes after `from_pos`.
fn reaches_terminal_after(repository: &Repository, route_idx: u32, from_pos: usize) -> bool {
    let mut seen: HashSet<u32> = HashSet::new();
    for (pos, visit) in repository.visits_by_route_idx(route_idx).enumerate() {
        let first_call = seen.insert(visit.stop_idx);
        if pos > from_pos && first_call && repository.is_terminal(visit.stop_idx) {
            return true;
        }
    }
    false
}
