/*!
Cheap "non-empty" probe over candidate dumps.
*/
use crate::parser::DumpReader;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Keep the paths that hold at least one data line after the header, in input order.
///
/// Files that cannot be opened or read are logged and left out; they never fail the call. Column
/// contents are not inspected.
pub fn filter_relevant_files<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let relevant: Vec<PathBuf> = paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|path| is_relevant(path))
        .map(Path::to_path_buf)
        .collect();
    debug!(
        "{} of {} files have data records",
        relevant.len(),
        paths.len()
    );
    relevant
}

/// [filter_relevant_files] applied to each source. Sources left without files are dropped.
pub fn filter_relevant_files_by_source<P: AsRef<Path>>(
    sources: &BTreeMap<String, Vec<P>>,
) -> BTreeMap<String, Vec<PathBuf>> {
    sources
        .iter()
        .filter_map(|(label, paths)| {
            let relevant = filter_relevant_files(paths);
            match relevant.is_empty() {
                true => None,
                false => Some((label.clone(), relevant)),
            }
        })
        .collect()
}

fn is_relevant(path: &Path) -> bool {
    let mut reader = match DumpReader::open(path) {
        Ok(reader) => reader,
        Err(e) => {
            warn!("skipping {}: {}", path.display(), e);
            return false;
        }
    };
    match reader.has_data_line() {
        Ok(has_data) => has_data,
        Err(e) => {
            warn!("skipping {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_relevance_boundary() {
        let dir = TempDir::new().unwrap();
        let header_only = write_file(&dir, "header_only.tsv", "prefix_id\tas_path\n");
        let one_row = write_file(&dir, "one_row.tsv", "prefix_id\tas_path\n1\t100 200\n");
        let empty = write_file(&dir, "empty.tsv", "");

        let relevant = filter_relevant_files(&[&header_only, &one_row, &empty]);
        assert_eq!(relevant, vec![one_row]);
    }

    #[test]
    fn test_unterminated_row() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "dump.tsv", "prefix_id\tas_path\n1\t100");
        assert_eq!(filter_relevant_files(&[&path]), vec![path]);
    }

    #[test]
    fn test_unopenable_is_skipped_and_order_kept() {
        let dir = TempDir::new().unwrap();
        let b = write_file(&dir, "b.tsv", "h\n1\n");
        let a = write_file(&dir, "a.tsv", "h\n1\n");
        let missing = dir.path().join("missing.tsv");

        let relevant = filter_relevant_files(&[b.clone(), missing, a.clone()]);
        assert_eq!(relevant, vec![b, a]);
    }

    #[test]
    fn test_empty_input() {
        let paths: Vec<PathBuf> = vec![];
        assert!(filter_relevant_files(&paths).is_empty());
    }

    #[test]
    fn test_by_source() {
        let dir = TempDir::new().unwrap();
        let full = write_file(&dir, "full.tsv", "h\n1\n");
        let header_only = write_file(&dir, "header_only.tsv", "h\n");

        let sources = BTreeMap::from([
            ("rrc00".to_string(), vec![full.clone(), header_only.clone()]),
            ("route-views2".to_string(), vec![header_only]),
        ]);
        let relevant = filter_relevant_files_by_source(&sources);
        assert_eq!(
            relevant,
            BTreeMap::from([("rrc00".to_string(), vec![full])])
        );
    }
}
