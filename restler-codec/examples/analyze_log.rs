//! Parses a RESTler-style network log, pairs requests with responses,
//! clusters the failures, and prints the run summary.
//!
//! Usage: `analyze_log <path-to-network.testing.log>`

use std::fs;

use restler_codec::{bucketize, pair_log_lines, parse_log_line, reduce_run_summary, split_on_sequence_boundary};
use restler_types::{BucketizerConfig, HttpSeq, Log};

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("usage: analyze_log <path-to-network.testing.log>");
        std::process::exit(1);
    });

    let text = fs::read_to_string(&path).unwrap_or_else(|err| {
        eprintln!("failed to read {path}: {err}");
        std::process::exit(1);
    });

    let lines: Vec<_> = text
        .lines()
        .enumerate()
        .filter_map(|(no, line)| parse_log_line(line, no + 1))
        .collect();

    let mut sequences = Vec::new();
    for group in split_on_sequence_boundary(lines) {
        match pair_log_lines(&group) {
            Ok(pairs) => sequences.push(HttpSeq::new(pairs)),
            Err(err) => eprintln!("pairing error: {err}"),
        }
    }
    let log = Log::new(sequences);

    let config = BucketizerConfig::default();
    let buckets = bucketize(&log, &config, None);
    let summary = reduce_run_summary(&log, &buckets);

    #[cfg(feature = "serde")]
    println!("{}", serde_json::to_string_pretty(&summary).expect("summary serializes"));

    #[cfg(not(feature = "serde"))]
    println!("{summary:#?}");
}
