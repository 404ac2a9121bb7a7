//! Value types for the REST API fuzzer's results-analysis core.
//!
//! This crate is pure data: URIs, headers, requests/responses, the generic
//! edit-script algebra, and the bucketized run summary. Nothing here parses
//! bytes or classifies log lines; see `restler-codec` for that.

#![deny(missing_debug_implementations)]

pub mod diff;
pub mod error;
pub mod headers;
pub mod http;
pub mod logline;
pub mod summary;
pub mod uri;

pub use diff::{Edit, MapEdit, OptionEdit, Replace, SeqEdit, SeqMapElementEdit, Verbose};
pub use error::{HttpParseError, PairingError};
pub use headers::Headers;
pub use http::{HttpSeq, Log, Request, RequestResponse, Response, ResponseClass, StatusCode};
pub use logline::{LogLine, RequestExecutionSummary, RequestTrace, ResponseTrace};
pub use summary::{Bucket, BucketId, BucketizerConfig, RunSummary};
pub use uri::Uri;
