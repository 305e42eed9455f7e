mod plan;
mod search;
mod survey;

pub use plan::*;
pub use search::*;
pub use survey::*;

use axum::http::StatusCode;
use std::collections::HashMap;

/// Reads the `from` and `to` query parameters.
fn endpoints(params: &HashMap<String, String>) -> Result<(&str, &str), StatusCode> {
    let from = params.get("from").ok_or(StatusCode::BAD_REQUEST)?.as_str();
    let to = params.get("to").ok_or(StatusCode::BAD_REQUEST)?.as_str();
    Ok((from, to))
}
