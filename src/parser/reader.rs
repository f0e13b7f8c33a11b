/*!
Line-oriented reading of route dumps.

[DumpReader] opens a dump through `oneio` (plain, `.gz` or `.bz2`), consumes the header line and
streams the remaining data lines. Record-level failures are tagged with the file path and line
number so a fatal error points at the offending row.
*/
use crate::error::{RecordError, ScanError};
use oneio::get_reader;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct DumpReader {
    path: String,
    reader: Box<dyn BufRead + Send>,
    header: String,
    buf: String,
    line_number: u64,
}

impl DumpReader {
    /// Open the dump at `path` and read its header line.
    ///
    /// An empty file yields an empty header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<DumpReader, ScanError> {
        let path = path_str(path.as_ref())?;
        let raw_reader = get_reader(path).map_err(|source| ScanError::Open {
            path: path.to_string(),
            source,
        })?;
        let mut reader = DumpReader {
            path: path.to_string(),
            reader: Box::new(BufReader::new(raw_reader)),
            header: String::new(),
            buf: String::new(),
            line_number: 0,
        };
        if reader.read_next_line()? {
            reader.header = std::mem::take(&mut reader.buf);
        }
        Ok(reader)
    }

    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    pub fn header(&self) -> &str {
        self.header.as_str()
    }

    /// Whether at least one more line follows, blank or not.
    pub fn has_data_line(&mut self) -> Result<bool, ScanError> {
        self.read_next_line()
    }

    /// Feed every non-empty data line to `f`, stopping at the first error.
    ///
    /// Returns the number of lines handed to `f`.
    pub fn for_each_line<F>(&mut self, mut f: F) -> Result<u64, ScanError>
    where
        F: FnMut(&str) -> Result<(), RecordError>,
    {
        let mut count = 0;
        while self.read_next_line()? {
            if self.buf.is_empty() {
                continue;
            }
            count += 1;
            f(self.buf.as_str()).map_err(|source| ScanError::Record {
                path: self.path.clone(),
                line: self.line_number,
                source,
            })?;
        }
        Ok(count)
    }

    /// Read the next line into `buf` without its line terminator. Returns `false` at end of file.
    fn read_next_line(&mut self) -> Result<bool, ScanError> {
        self.buf.clear();
        let n = self
            .reader
            .read_line(&mut self.buf)
            .map_err(|source| ScanError::Read {
                path: self.path.clone(),
                source,
            })?;
        if n == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        Ok(true)
    }
}

pub(crate) fn path_str(path: &Path) -> Result<&str, ScanError> {
    path.to_str()
        .ok_or_else(|| ScanError::InvalidPath(path.to_path_buf()))
}
