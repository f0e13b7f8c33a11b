/*!
Scans over sets of route dumps: relevance filtering, vantage point discovery and per vantage point
statistics.
*/
mod discovery;
mod relevance;
mod stat;

pub use discovery::{discover_vantage_points, discover_vantage_points_by_source};
pub use relevance::{filter_relevant_files, filter_relevant_files_by_source};
pub use stat::{build_vantage_point_stat, VantagePointStatBuilder};
