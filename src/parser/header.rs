/*!
Resolving named columns of a route dump header to field positions.

All dumps of one scan are expected to share the header layout of the first file, so positions are
resolved once and the resulting [RouteColumns] value is threaded through the whole scan.
*/
use crate::error::ScanError;
use crate::parser::reader::DumpReader;
use std::path::Path;

/// Column names consumed by the scans.
pub mod columns {
    pub const AS_PATH: &str = "as_path";
    pub const INVALID_AS_PATH_ASNS: &str = "invalid_as_path_asns";
    pub const PREPENDING: &str = "prepending";
    pub const AS_PATH_LOOP: &str = "as_path_loop";
    pub const INPUT_CLIQUE_SPLIT: &str = "input_clique_split";
    pub const PREFIX_ID: &str = "prefix_id";
}

/// Zero-based position of the first header field exactly equal to `column_name`.
pub fn find_column_index(header_line: &str, column_name: &str) -> Result<usize, ScanError> {
    header_line
        .split('\t')
        .position(|field| field == column_name)
        .ok_or_else(|| ScanError::ColumnNotFound {
            column: column_name.to_string(),
        })
}

/// Read the header line of a dump without scanning its records.
pub fn read_header<P: AsRef<Path>>(path: P) -> Result<String, ScanError> {
    let reader = DumpReader::open(path)?;
    Ok(reader.header().to_string())
}

/// Field positions of every column the stat builder reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteColumns {
    pub as_path: usize,
    pub invalid_as_path_asns: usize,
    pub prepending: usize,
    pub as_path_loop: usize,
    pub input_clique_split: usize,
    pub prefix_id: usize,
}

impl RouteColumns {
    /// Resolve all columns from a header line. Fails on the first missing column.
    pub fn from_header(header_line: &str) -> Result<Self, ScanError> {
        Ok(RouteColumns {
            as_path: find_column_index(header_line, columns::AS_PATH)?,
            invalid_as_path_asns: find_column_index(header_line, columns::INVALID_AS_PATH_ASNS)?,
            prepending: find_column_index(header_line, columns::PREPENDING)?,
            as_path_loop: find_column_index(header_line, columns::AS_PATH_LOOP)?,
            input_clique_split: find_column_index(header_line, columns::INPUT_CLIQUE_SPLIT)?,
            prefix_id: find_column_index(header_line, columns::PREFIX_ID)?,
        })
    }

    /// Resolve all columns from the header of the dump at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        RouteColumns::from_header(&read_header(path)?)
    }
}
