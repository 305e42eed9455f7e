pub mod config;
pub mod planner;
pub mod repository;
pub mod shared;
pub mod survey;
pub mod table;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::planner::{Arrival, PlanResult, Planner, Segment};
    pub use crate::repository::{Repository, Route, Stop, StopVisit};
    pub use crate::shared::{Coordinate, Distance, FareTable, fare, great_circle_km, normalize};
    pub use crate::survey::{CsvSink, ResponseSink, SurveyResponse};
    pub use crate::table::{TableConfig, TableReader};
}
