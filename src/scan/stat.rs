/*!
Accumulating announcement statistics of one vantage point over a set of route dumps.
*/
use crate::error::ScanError;
use crate::models::{Asn, VantagePointStat, DEFAULT_AS_RANK};
use crate::parser::{as_path_origin, columns, DumpReader, RouteColumns, RouteRecord};
use log::{debug, info};
use std::path::Path;

/// Builder for a [VantagePointStat].
///
/// ```no_run
/// use bgpkit_vantage::VantagePointStatBuilder;
///
/// let stat = VantagePointStatBuilder::new(3356)
///     .with_as_rank(1)
///     .build(&["rrc00.tsv", "rrc01.tsv"])
///     .unwrap();
/// println!("{} announcements", stat.ann_count);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VantagePointStatBuilder {
    vantage_point: Asn,
    as_rank: u32,
    compute_poisoning: bool,
}

impl VantagePointStatBuilder {
    /// New builder with [DEFAULT_AS_RANK] and path poisoning detection enabled.
    pub fn new(vantage_point: impl Into<Asn>) -> Self {
        VantagePointStatBuilder {
            vantage_point: vantage_point.into(),
            as_rank: DEFAULT_AS_RANK,
            compute_poisoning: true,
        }
    }

    pub fn with_as_rank(self, as_rank: u32) -> Self {
        VantagePointStatBuilder { as_rank, ..self }
    }

    /// When disabled, every announcement is counted as free of path poisoning and the poisoning
    /// indicator columns are never read from records.
    pub fn with_path_poisoning(self, compute_poisoning: bool) -> Self {
        VantagePointStatBuilder {
            compute_poisoning,
            ..self
        }
    }

    /// Scan `paths` in order and fold every announcement of the vantage point into one stat.
    ///
    /// Column positions are resolved from the header of the first file.
    pub fn build<P: AsRef<Path>>(&self, paths: &[P]) -> Result<VantagePointStat, ScanError> {
        let columns = resolve_columns(paths)?;
        let mut stat = self.empty_stat();
        for path in paths {
            self.scan_file(path.as_ref(), &columns, &mut stat)?;
        }
        self.log_summary(&stat, paths.len());
        Ok(stat)
    }

    /// Same result as [VantagePointStatBuilder::build], scanning files concurrently.
    ///
    /// Each file is scanned into its own partial stat on the rayon pool; partials are merged by set
    /// union and count summation.
    #[cfg(feature = "parallel")]
    pub fn build_parallel<P>(&self, paths: &[P]) -> Result<VantagePointStat, ScanError>
    where
        P: AsRef<Path> + Sync,
    {
        use rayon::prelude::*;

        let columns = resolve_columns(paths)?;
        let stat = paths
            .par_iter()
            .map(|path| {
                let mut partial = self.empty_stat();
                self.scan_file(path.as_ref(), &columns, &mut partial)?;
                Ok::<_, ScanError>(partial)
            })
            .try_reduce(
                || self.empty_stat(),
                |mut a, b| {
                    a.merge(b);
                    Ok(a)
                },
            )?;
        self.log_summary(&stat, paths.len());
        Ok(stat)
    }

    fn empty_stat(&self) -> VantagePointStat {
        VantagePointStat::new(self.vantage_point, self.as_rank)
    }

    fn scan_file(
        &self,
        path: &Path,
        columns: &RouteColumns,
        stat: &mut VantagePointStat,
    ) -> Result<(), ScanError> {
        let mut reader = DumpReader::open(path)?;
        let before = stat.ann_count;
        let records = reader.for_each_line(|line| {
            let record = RouteRecord::from_line(line);
            let as_path = record.field(columns.as_path, columns::AS_PATH)?;
            if as_path_origin(as_path)? != Some(self.vantage_point) {
                return Ok(());
            }
            let prefix_id = record.prefix_id(columns)?;
            let is_path_poisoning = match self.compute_poisoning {
                true => record.poisoning_indicators(columns)?.is_path_poisoning(),
                false => false,
            };
            stat.add_announcement(prefix_id, is_path_poisoning);
            Ok(())
        })?;
        debug!(
            "{}: {} of {} records announced by AS{}",
            reader.path(),
            stat.ann_count - before,
            records,
            self.vantage_point
        );
        Ok(())
    }

    fn log_summary(&self, stat: &VantagePointStat, file_count: usize) {
        info!(
            "AS{}: {} announcements of {} prefixes ({} without path poisoning) in {} files",
            self.vantage_point,
            stat.ann_count,
            stat.prefix_count(),
            stat.no_path_poisoning_prefix_count(),
            file_count
        );
    }
}

/// Build the statistic of `vantage_point` over `paths`.
///
/// See [VantagePointStatBuilder] for the configurable form.
pub fn build_vantage_point_stat<P: AsRef<Path>>(
    vantage_point: impl Into<Asn>,
    as_rank: u32,
    paths: &[P],
    compute_poisoning: bool,
) -> Result<VantagePointStat, ScanError> {
    VantagePointStatBuilder::new(vantage_point)
        .with_as_rank(as_rank)
        .with_path_poisoning(compute_poisoning)
        .build(paths)
}

fn resolve_columns<P: AsRef<Path>>(paths: &[P]) -> Result<RouteColumns, ScanError> {
    let first = paths.first().ok_or(ScanError::NoInputFiles)?;
    RouteColumns::from_file(first)
}
