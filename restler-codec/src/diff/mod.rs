pub mod http;
#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "json")]
pub use json::{diff_json, JsonEdit};

pub use http::{
    diff_headers, diff_log, diff_pair, diff_request, diff_response, diff_http_seq, diff_uri,
    HeadersDiff, HttpSeqEdit, LogEdit, PairEdit, PairFieldEdit, RequestEdit, RequestFieldEdit,
    ResponseEdit, ResponseFieldEdit, UriEdit, UriFieldEdit,
};
