//! Parses raw fuzzing-run transcripts into structured logs, buckets failing
//! responses by similarity, reduces them into a run summary, and diffs HTTP
//! values and whole logs using the edit-script algebra from `restler-types`.

#![deny(missing_debug_implementations)]

pub mod bucketizer;
pub mod diff;
pub mod hash;
pub mod pairing;
pub mod parse;
pub mod summary;

#[cfg(test)]
pub mod testing;

pub use bucketizer::{bucketize, BucketOverflow};
pub use diff::{
    diff_headers, diff_http_seq, diff_log, diff_pair, diff_request, diff_response, diff_uri,
};
#[cfg(feature = "json")]
pub use diff::{diff_json, JsonEdit};
pub use hash::request_fingerprint;
pub use pairing::{pair_log_lines, split_on_sequence_boundary};
pub use parse::http::{parse_request, parse_response};
pub use parse::log::parse_log_line;
pub use summary::reduce_run_summary;
