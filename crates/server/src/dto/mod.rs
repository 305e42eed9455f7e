mod plan;
mod stop;
mod survey;

pub use plan::*;
pub use stop::*;
pub use survey::*;
