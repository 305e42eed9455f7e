use std::{cmp, mem::swap};

/// Levenshtein edit distance counted in chars.
pub fn distance(s1_in: &str, s2_in: &str) -> usize {
    if s1_in == s2_in {
        return 0;
    }

    let (mut s1, mut s2) = (s1_in, s2_in);
    let mut s1_len = s1.chars().count();
    let mut s2_len = s2.chars().count();
    if s2_len > s1_len {
        swap(&mut s1, &mut s2);
        swap(&mut s1_len, &mut s2_len);
    }

    // Single row of the classic matrix, indexed by the shorter string.
    let mut row: Vec<usize> = (0..=s2_len).collect();
    for (i, ic) in s1.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, jc) in s2.chars().enumerate() {
            let sub_cost = if ic == jc { 0 } else { 1 };
            let next = cmp::min(cmp::min(row[j + 1] + 1, row[j] + 1), diagonal + sub_cost);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[s2_len]
}

/// Token-by-token similarity in `0.0..=1.0`, averaged over the needle's tokens.
pub fn score(needle: &str, hay: &str) -> f64 {
    let needle_tokens: Vec<_> = needle.split_whitespace().collect();
    let hay_tokens: Vec<_> = hay.split_whitespace().collect();
    if needle_tokens.is_empty() {
        return 0.0;
    }
    let score: f64 = needle_tokens
        .iter()
        .zip(hay_tokens.iter())
        .map(|(n, h)| score_inner(n, h))
        .sum();
    score / needle_tokens.len() as f64
}

fn score_inner(s1: &str, s2: &str) -> f64 {
    let dist = distance(s1, s2);
    if dist == 0 {
        1.0
    } else {
        1.0 - (dist as f64 / cmp::max(s1.chars().count(), s2.chars().count()) as f64)
    }
}

#[test]
fn fuzzy_score_exact() {
    assert_eq!(score("kempegowda bus station", "kempegowda bus station"), 1.0);
}

#[test]
fn fuzzy_score_empty_needle() {
    assert_eq!(score("", "majestic"), 0.0);
}

#[test]
fn fuzzy_score_partial() {
    let close = score("jayanagr", "jayanagar 4th block");
    let far = score("jayanagr", "hebbal");
    assert!(close > far);
}
