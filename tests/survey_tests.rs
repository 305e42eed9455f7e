use busplan::prelude::*;
use chrono::Local;
use std::{env, fs, process};

fn response(source: &str) -> SurveyResponse {
    SurveyResponse {
        timestamp: Local::now(),
        source: source.into(),
        destination: "Electronic City".into(),
        selected_routes: vec!["356CW".into()],
        other_route: "V-500D".into(),
        wait_time: "10-20 min".into(),
        frequency: "Every 20-30 minutes".into(),
        transfers: "1 transfer".into(),
        intermediate_stops: String::new(),
    }
}

#[test]
fn append_to_file_test() {
    let path = env::temp_dir().join(format!("busplan-survey-{}.csv", process::id()));
    let _ = fs::remove_file(&path);

    let mut sink = CsvSink::append_to(&path).unwrap();
    sink.append(&response("Majestic")).unwrap();
    drop(sink);

    // Reopening must not repeat the header.
    let mut sink = CsvSink::append_to(&path).unwrap();
    sink.append(&response("Hebbal")).unwrap();
    drop(sink);

    let written = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("timestamp,"));
    assert!(lines[1].contains(",Majestic,Electronic City,356CW,V-500D,"));
    assert!(lines[2].contains(",Hebbal,Electronic City,356CW,V-500D,"));
}
