/*!
Decoding of a single tab-separated route record.

Records are borrowed views over one line of a dump; nothing is copied out of the line unless a
numeric field has to be parsed.
*/
use crate::error::RecordError;
use crate::models::Asn;
use crate::parser::header::{columns, RouteColumns};
use smallvec::SmallVec;

/// Fields of one data line, split on tabs.
#[derive(Debug, Clone)]
pub struct RouteRecord<'a> {
    fields: SmallVec<[&'a str; 32]>,
}

impl<'a> RouteRecord<'a> {
    pub fn from_line(line: &'a str) -> Self {
        RouteRecord {
            fields: line.split('\t').collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at `index`, where `column` only names the field for error reporting.
    pub fn field(&self, index: usize, column: &'static str) -> Result<&'a str, RecordError> {
        self.fields
            .get(index)
            .copied()
            .ok_or(RecordError::MissingField {
                column,
                index,
                found: self.fields.len(),
            })
    }

    /// The announced prefix ID.
    pub fn prefix_id(&self, columns: &RouteColumns) -> Result<u64, RecordError> {
        let value = self.field(columns.prefix_id, columns::PREFIX_ID)?;
        value
            .parse::<u64>()
            .map_err(|_| RecordError::InvalidInteger {
                column: columns::PREFIX_ID,
                value: value.to_string(),
            })
    }

    pub fn poisoning_indicators(
        &self,
        columns: &RouteColumns,
    ) -> Result<PoisoningIndicators<'a>, RecordError> {
        Ok(PoisoningIndicators {
            invalid_as_path_asns: self
                .field(columns.invalid_as_path_asns, columns::INVALID_AS_PATH_ASNS)?,
            prepending: self.field(columns.prepending, columns::PREPENDING)?,
            as_path_loop: self.field(columns.as_path_loop, columns::AS_PATH_LOOP)?,
            input_clique_split: self
                .field(columns.input_clique_split, columns::INPUT_CLIQUE_SPLIT)?,
        })
    }
}

/// Extract the `index`-th tab-separated field without splitting the rest of the line.
pub fn nth_field<'a>(
    line: &'a str,
    index: usize,
    column: &'static str,
) -> Result<&'a str, RecordError> {
    let mut fields = line.split('\t');
    match fields.nth(index) {
        Some(field) => Ok(field),
        None => Err(RecordError::MissingField {
            column,
            index,
            // `nth` consumed every field of the line
            found: line.split('\t').count(),
        }),
    }
}

/// Whether the AS path contains an AS set, written with braces, e.g. `100 200 {300,400}`.
pub fn is_as_set_path(as_path: &str) -> bool {
    as_path.contains(['{', '}'])
}

/// The vantage point of a record: the first AS of its path.
///
/// Returns `None` for paths that cannot be attributed, i.e. empty paths and paths containing an
/// AS set. A first token that is not an integer is an error.
pub fn as_path_origin(as_path: &str) -> Result<Option<Asn>, RecordError> {
    if is_as_set_path(as_path) {
        return Ok(None);
    }
    let Some(first) = as_path.split_whitespace().next() else {
        return Ok(None);
    };
    first
        .parse::<Asn>()
        .map(Some)
        .map_err(|_| RecordError::InvalidInteger {
            column: columns::AS_PATH,
            value: first.to_string(),
        })
}

/// Path poisoning indicator fields of one record, kept as the literal strings from the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoisoningIndicators<'a> {
    pub invalid_as_path_asns: &'a str,
    pub prepending: &'a str,
    pub as_path_loop: &'a str,
    pub input_clique_split: &'a str,
}

impl PoisoningIndicators<'_> {
    /// A record is clean only if every indicator holds the exact literal the exporter writes for
    /// "absent": `[]` and `False`. Any other spelling, including `false`, counts as poisoned.
    pub fn is_clean(&self) -> bool {
        self.invalid_as_path_asns == "[]"
            && self.prepending == "False"
            && self.as_path_loop == "False"
            && self.input_clique_split == "False"
    }

    pub fn is_path_poisoning(&self) -> bool {
        !self.is_clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> RouteColumns {
        RouteColumns::from_header(
            "prefix_id\tas_path\tinvalid_as_path_asns\tprepending\tas_path_loop\tinput_clique_split",
        )
        .unwrap()
    }

    #[test]
    fn test_split_fields() {
        let record = RouteRecord::from_line("10\t100 200\t[]\t\tFalse\tFalse");
        assert_eq!(record.len(), 6);
        assert_eq!(record.field(1, columns::AS_PATH).unwrap(), "100 200");
        assert_eq!(record.field(3, columns::PREPENDING).unwrap(), "");
        assert_eq!(
            record.field(6, columns::PREFIX_ID),
            Err(RecordError::MissingField {
                column: columns::PREFIX_ID,
                index: 6,
                found: 6
            })
        );
    }

    #[test]
    fn test_nth_field() {
        assert_eq!(nth_field("a\tb\tc", 1, columns::AS_PATH).unwrap(), "b");
        assert_eq!(nth_field("a\tb\t", 2, columns::AS_PATH).unwrap(), "");
        assert_eq!(
            nth_field("a\tb", 4, columns::AS_PATH),
            Err(RecordError::MissingField {
                column: columns::AS_PATH,
                index: 4,
                found: 2
            })
        );
    }

    #[test]
    fn test_prefix_id() {
        let columns = columns();
        let record = RouteRecord::from_line("10\t100 200\t[]\tFalse\tFalse\tFalse");
        assert_eq!(record.prefix_id(&columns).unwrap(), 10);

        let record = RouteRecord::from_line("ten\t100 200\t[]\tFalse\tFalse\tFalse");
        assert_eq!(
            record.prefix_id(&columns),
            Err(RecordError::InvalidInteger {
                column: columns::PREFIX_ID,
                value: "ten".to_string()
            })
        );
    }

    #[test]
    fn test_as_path_origin() {
        assert_eq!(as_path_origin("100 200 300").unwrap(), Some(Asn::new(100)));
        assert_eq!(as_path_origin("  65000  1").unwrap(), Some(Asn::new(65000)));
        assert_eq!(as_path_origin("100").unwrap(), Some(Asn::new(100)));
        assert_eq!(as_path_origin("").unwrap(), None);
        assert_eq!(as_path_origin("   ").unwrap(), None);
        assert_eq!(as_path_origin("100 200 {300,400}").unwrap(), None);
        assert_eq!(as_path_origin("{100} 200").unwrap(), None);
        assert_eq!(as_path_origin("100 300}").unwrap(), None);
        assert_eq!(
            as_path_origin("AS100 200"),
            Err(RecordError::InvalidInteger {
                column: columns::AS_PATH,
                value: "AS100".to_string()
            })
        );
    }

    #[test]
    fn test_clean_gate() {
        let columns = columns();
        let clean = RouteRecord::from_line("10\t100 200\t[]\tFalse\tFalse\tFalse");
        assert!(clean.poisoning_indicators(&columns).unwrap().is_clean());

        for line in [
            "10\t100 200\t[5]\tFalse\tFalse\tFalse",
            "10\t100 200\t[]\tTrue\tFalse\tFalse",
            "10\t100 200\t[]\tFalse\tTrue\tFalse",
            "10\t100 200\t[]\tFalse\tFalse\tTrue",
            "10\t100 200\t[]\tfalse\tFalse\tFalse",
            "10\t100 200\t[ ]\tFalse\tFalse\tFalse",
            "10\t100 200\t\tFalse\tFalse\tFalse",
            "10\t100 200\t[]\tFalse\tFalse\tFALSE",
        ] {
            let record = RouteRecord::from_line(line);
            let indicators = record.poisoning_indicators(&columns).unwrap();
            assert!(indicators.is_path_poisoning(), "{}", line);
        }
    }

    #[test]
    fn test_indicators_missing_field() {
        let columns = columns();
        let record = RouteRecord::from_line("10\t100 200\t[]\tFalse");
        assert!(matches!(
            record.poisoning_indicators(&columns),
            Err(RecordError::MissingField {
                column: columns::AS_PATH_LOOP,
                index: 4,
                found: 4
            })
        ));
    }
}
