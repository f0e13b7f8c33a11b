use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::PathBuf;

use bgpkit_vantage::{
    discover_vantage_points, discover_vantage_points_by_source, filter_relevant_files,
    sort_by_rank, Asn, ScanError, VantagePointStat, VantagePointStatBuilder,
};
use clap::{Parser, Subcommand};

/// bgpkit-vantage is a simple cli tool that summarizes vantage points of tab-separated route dumps.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the files that contain at least one record
    Relevant {
        /// Route dump files
        #[clap(name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the vantage points found in the files
    Discover {
        /// Route dump files
        #[clap(name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Group files by parent directory and print the directories each vantage point appears in
        #[clap(long)]
        by_parent_dir: bool,
    },
    /// Build announcement statistics of vantage points
    Stat {
        /// Vantage point AS number, can be repeated
        #[clap(short, long = "asn", required = true)]
        asns: Vec<Asn>,

        /// AS rank of a vantage point as ASN:RANK, can be repeated. Unranked ASNs sort last
        #[clap(short, long = "rank", value_parser = parse_rank)]
        ranks: Vec<(Asn, u32)>,

        /// Do not inspect path poisoning columns; count every announcement as clean
        #[clap(long)]
        no_poisoning: bool,

        /// Scan files in parallel
        #[clap(long)]
        parallel: bool,

        /// Output as JSON objects
        #[clap(long)]
        json: bool,

        /// Route dump files
        #[clap(name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },
}

fn parse_rank(value: &str) -> Result<(Asn, u32), String> {
    let (asn, rank) = value
        .split_once(':')
        .ok_or_else(|| format!("expected ASN:RANK, got {}", value))?;
    let asn = asn
        .parse::<Asn>()
        .map_err(|e| format!("invalid ASN {}: {}", asn, e))?;
    let rank = rank
        .parse::<u32>()
        .map_err(|e| format!("invalid rank {}: {}", rank, e))?;
    Ok((asn, rank))
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    let lines = match run(opts.command) {
        Ok(lines) => lines,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    for line in lines {
        if let Err(e) = writeln!(stdout, "{}", &line) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("{}", e);
            }
            std::process::exit(1);
        }
    }
}

fn run(command: Command) -> Result<Vec<String>, ScanError> {
    match command {
        Command::Relevant { files } => Ok(filter_relevant_files(&files)
            .iter()
            .map(|p| p.display().to_string())
            .collect()),
        Command::Discover {
            files,
            by_parent_dir: false,
        } => Ok(discover_vantage_points(&files)?
            .iter()
            .map(|asn| asn.to_string())
            .collect()),
        Command::Discover {
            files,
            by_parent_dir: true,
        } => {
            let mut sources: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
            for file in files {
                sources.entry(parent_label(&file)).or_default().push(file);
            }
            Ok(discover_vantage_points_by_source(&sources)?
                .into_iter()
                .sorted_by_key(|(asn, _)| *asn)
                .map(|(asn, labels)| format!("{}\t{}", asn, labels.iter().sorted().join(",")))
                .collect())
        }
        Command::Stat {
            asns,
            ranks,
            no_poisoning,
            parallel,
            json,
            files,
        } => {
            let ranks: HashMap<Asn, u32> = ranks.into_iter().collect();
            let mut stats = asns
                .into_iter()
                .unique()
                .map(|asn| {
                    let mut builder =
                        VantagePointStatBuilder::new(asn).with_path_poisoning(!no_poisoning);
                    if let Some(rank) = ranks.get(&asn) {
                        builder = builder.with_as_rank(*rank);
                    }
                    match parallel {
                        true => builder.build_parallel(&files),
                        false => builder.build(&files),
                    }
                })
                .collect::<Result<Vec<VantagePointStat>, ScanError>>()?;
            sort_by_rank(&mut stats);
            Ok(stats
                .iter()
                .map(|stat| match json {
                    true => serde_json::json!(stat).to_string(),
                    false => format!(
                        "AS{}|rank {}|{} announcements|{} prefixes|{} without path poisoning",
                        stat.asn,
                        stat.as_rank,
                        stat.ann_count,
                        stat.prefix_count(),
                        stat.no_path_poisoning_prefix_count()
                    ),
                })
                .collect())
        }
    }
}

fn parent_label(file: &std::path::Path) -> String {
    file.parent()
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}
