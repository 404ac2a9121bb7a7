use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::http::{Request, Response};

/// One token recognized out of a raw transcript line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogLine {
    SequenceBeginning,
    Sending(DateTime<Utc>, Request<String>),
    Received(DateTime<Utc>, Response<String>),
}

/// How a sent request is reported in a [`RequestExecutionSummary`].
///
/// This is built from an already-parsed [`Request`]; a send the parser
/// could not interpret as HTTP never reaches [`LogLine::Sending`] in the
/// first place (see `parse_log_line`), so there is no raw-text case to
/// report here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestTrace {
    RequestData {
        method: String,
        path: String,
        query: IndexMap<String, String>,
        body: String,
    },
}

/// How a received response is reported in a [`RequestExecutionSummary`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseTrace {
    ResponseData {
        code: i32,
        code_description: String,
        content: String,
    },
}

/// A de-normalized, report-ready record of one executed request/response.
///
/// This is the unit the bucketizer clusters and the run summary counts; it
/// exists separately from [`Request`]/[`Response`] because it carries only
/// what reporting needs (a flattened path/query instead of a full [`Uri`](crate::uri::Uri)).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestExecutionSummary {
    pub request: RequestTrace,
    pub response: ResponseTrace,
}

impl RequestExecutionSummary {
    pub fn new(request: RequestTrace, response: ResponseTrace) -> Self {
        Self { request, response }
    }
}
