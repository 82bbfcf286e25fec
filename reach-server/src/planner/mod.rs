//! Reachability planner.
//!
//! Answers "from this cell, starting at this time, where can I get within
//! my time, money and CO2 budgets, and how soon?" for every cell in the
//! schedule at once.

mod budget;
mod config;
mod detail;
mod result;
mod search;

pub use budget::Budgets;
pub use config::SearchConfig;
pub use detail::DestinationDetail;
pub use result::{Arrival, ReachabilityResult, SearchStats};
pub use search::{Planner, SearchError, SearchRequest};
