use busplan::prelude::{CsvSink, Repository};
use std::fs::File;
use tokio::sync::Mutex;

pub struct AppState {
    pub repository: Repository,
    pub sink: Mutex<CsvSink<File>>,
}
