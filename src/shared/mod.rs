pub mod fare;
pub mod fuzzy;
pub mod geo;

pub use fare::*;
pub use geo::*;

use rayon::prelude::*;
use std::{cmp::Ordering, fmt::Display};

pub trait Identifiable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn normalized_name(&self) -> &str;
}

/// Canonical lookup key for a stop name.
///
/// Trims, lower-cases and collapses runs of inner whitespace into one space,
/// so names that only differ in casing or spacing share a key. The display
/// name keeps its original spacing. Anything displayable is accepted.
pub fn normalize(raw: impl Display) -> String {
    raw.to_string()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Generic fuzzy search function built for multithreaded searching.
pub fn search<'a, T>(needle: &str, haystack: &'a [T]) -> Vec<&'a T>
where
    T: Send + Sync + Identifiable,
{
    let normalized_needle = normalize(needle);
    let mut results: Vec<(&T, f64)> = haystack
        .par_iter()
        .filter_map(|hay| {
            let score = fuzzy::score(&normalized_needle, hay.normalized_name());
            if score > 0.1 { Some((hay, score)) } else { None }
        })
        .collect();

    results.par_sort_by(|(a_hay, a), (b_hay, b)| {
        b.partial_cmp(a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a_hay.name().cmp(b_hay.name()))
    });
    results.into_iter().map(|(entity, _)| entity).collect()
}

#[test]
fn normalize_case_and_whitespace_test() {
    assert_eq!(normalize("  Majestic  "), "majestic");
    assert_eq!(normalize("Silk  Board\tJunction"), "silk board junction");
    assert_eq!(normalize("SILK BOARD JUNCTION"), normalize(" silk board junction "));
}

#[test]
fn normalize_idempotent_test() {
    let once = normalize(" Banashankari TTMC ");
    assert_eq!(normalize(&once), once);
}

#[test]
fn normalize_non_string_test() {
    assert_eq!(normalize(500), "500");
}
