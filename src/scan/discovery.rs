/*!
Discovery of the vantage points present in a set of route dumps.
*/
use crate::error::ScanError;
use crate::models::Asn;
use crate::parser::{as_path_origin, columns, find_column_index, nth_field, read_header, DumpReader};
use itertools::Itertools;
use log::{debug, info};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Distinct vantage points observed across `paths`, in ascending order.
///
/// The `as_path` column is resolved from the first file and assumed to sit at the same position in
/// every other file. Records with an empty path or an AS set are ignored.
pub fn discover_vantage_points<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Asn>, ScanError> {
    let first = paths.first().ok_or(ScanError::NoInputFiles)?;
    let as_path_index = find_column_index(&read_header(first)?, columns::AS_PATH)?;

    let mut vantage_points = HashSet::new();
    for path in paths {
        scan_origins(path.as_ref(), as_path_index, |asn| {
            vantage_points.insert(asn);
        })?;
    }

    info!(
        "found {} vantage points in {} files",
        vantage_points.len(),
        paths.len()
    );
    Ok(vantage_points.into_iter().sorted().collect())
}

/// Map every observed vantage point to the labels of the sources it was seen in.
///
/// `sources` maps a label (e.g. a collector directory name) to its files. The `as_path` column is
/// resolved from the first file of the first non-empty source; sources without files are skipped.
pub fn discover_vantage_points_by_source<P: AsRef<Path>>(
    sources: &BTreeMap<String, Vec<P>>,
) -> Result<HashMap<Asn, HashSet<String>>, ScanError> {
    let first = sources
        .values()
        .find_map(|paths| paths.first())
        .ok_or(ScanError::NoInputFiles)?;
    let as_path_index = find_column_index(&read_header(first)?, columns::AS_PATH)?;

    let mut vantage_point_sources: HashMap<Asn, HashSet<String>> = HashMap::new();
    for (label, paths) in sources {
        for path in paths {
            scan_origins(path.as_ref(), as_path_index, |asn| {
                let labels = vantage_point_sources.entry(asn).or_default();
                if !labels.contains(label) {
                    labels.insert(label.clone());
                }
            })?;
        }
    }

    info!(
        "found {} vantage points across {} sources",
        vantage_point_sources.len(),
        sources.len()
    );
    Ok(vantage_point_sources)
}

/// Call `f` with the origin of every attributable record of the dump at `path`.
fn scan_origins<F>(path: &Path, as_path_index: usize, mut f: F) -> Result<(), ScanError>
where
    F: FnMut(Asn),
{
    let mut reader = DumpReader::open(path)?;
    let records = reader.for_each_line(|line| {
        let as_path = nth_field(line, as_path_index, columns::AS_PATH)?;
        if let Some(asn) = as_path_origin(as_path)? {
            f(asn);
        }
        Ok(())
    })?;
    debug!("scanned {} records from {}", records, reader.path());
    Ok(())
}
