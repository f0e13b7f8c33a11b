/*!
bgpkit-vantage extracts per-vantage-point routing statistics from tab-separated route collector
dumps.

A vantage point is the network that handed a route to the collector, i.e. the first AS of the
route's AS path. For a given vantage point the crate counts how many announcements it made, which
prefixes it announced, and which of those prefixes it announced at least once without any sign of
path poisoning.

# Input format

Dumps are tab-separated text files (optionally `.gz` or `.bz2` compressed). The first line is a
header naming the columns; every other line is one route. The columns read are:

| column                 | content                                              |
|------------------------|------------------------------------------------------|
| `as_path`              | space-separated ASNs; `{..}` marks an AS set         |
| `prefix_id`            | integer ID of the announced prefix                   |
| `invalid_as_path_asns` | `[]` when the path holds no invalid ASN              |
| `prepending`           | `True` / `False`                                     |
| `as_path_loop`         | `True` / `False`                                     |
| `input_clique_split`   | `True` / `False`                                     |

Routes whose AS path contains an AS set cannot be attributed to a single vantage point and are
ignored by every scan.

# Examples

## Finding vantage points

```no_run
use bgpkit_vantage::{discover_vantage_points, filter_relevant_files};

let candidates = vec!["rrc00.tsv", "rrc01.tsv", "route-views2.tsv"];
let files = filter_relevant_files(&candidates);
for asn in discover_vantage_points(&files).unwrap() {
    println!("{}", asn);
}
```

## Building and ranking statistics

```no_run
use bgpkit_vantage::{build_vantage_point_stat, sort_by_rank};

let files = vec!["rrc00.tsv", "rrc01.tsv"];
let mut stats = vec![
    build_vantage_point_stat(3356, 1, &files, true).unwrap(),
    build_vantage_point_stat(174, 2, &files, true).unwrap(),
];
sort_by_rank(&mut stats);
for stat in &stats {
    println!(
        "AS{}: {} announcements, {} prefixes, {} without path poisoning",
        stat.asn,
        stat.ann_count,
        stat.prefix_count(),
        stat.no_path_poisoning_prefix_count()
    );
}
```

# Errors

Discovery and stat building fail on the first problem: an empty file list, a missing column, a
file that cannot be opened, or a numeric field that is not an integer. See [ScanError].
[filter_relevant_files] never fails; it leaves out files it cannot open.
*/

pub mod error;
pub mod models;
pub mod parser;
pub mod scan;

pub use error::{RecordError, ScanError};
pub use models::{sort_by_rank, Asn, VantagePointStat, DEFAULT_AS_RANK};
pub use parser::{DumpReader, RouteColumns};
pub use scan::{
    build_vantage_point_stat, discover_vantage_points, discover_vantage_points_by_source,
    filter_relevant_files, filter_relevant_files_by_source, VantagePointStatBuilder,
};
