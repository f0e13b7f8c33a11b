/*!
Column-oriented parsing of tab-separated route dumps: header resolution, record decoding and the
line reader shared by every scan.
*/
pub mod header;
pub mod reader;
pub mod record;

pub use header::{columns, find_column_index, read_header, RouteColumns};
pub use reader::DumpReader;
pub use record::{as_path_origin, is_as_set_path, nth_field, PoisoningIndicators, RouteRecord};
