//! Data types produced by the vantage point scans.

mod asn;
mod vantage_point_stat;

pub use asn::*;
pub use vantage_point_stat::*;
