//! Composes the generic edit-script algebra over URIs, headers, requests,
//! responses, pairs, sequences, and whole logs.
//!
//! `B` is the request/response body type; `BR` is whatever recursive edit
//! a caller-supplied body differ produces (e.g. [`Replace<String>`] for raw
//! text, or a JSON-tree edit when the `json` feature is used). The
//! equal-collapse rule is enforced at every composite level here, not left
//! to callers.

use indexmap::IndexMap;

use restler_types::diff::{diff_eq, diff_map, diff_option, diff_seq};
use restler_types::{
    Edit, Headers, HttpSeq, Log, OptionEdit, Replace, Request, RequestResponse, Response,
    SeqMapElementEdit, StatusCode, Uri,
};

/// The per-field edit of a [`Uri`] when it is not wholly equal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UriFieldEdit {
    pub path: Edit<Vec<String>, Vec<SeqMapElementEdit<String, Replace<String>>>>,
    pub query_string: Edit<IndexMap<String, String>, IndexMap<String, SeqMapElementEdit<String, Replace<String>>>>,
}

pub type UriEdit = Edit<Uri, UriFieldEdit>;

/// `path` via sequence diff of strings; `queryString` via map diff of strings.
pub fn diff_uri(a: &Uri, b: &Uri) -> UriEdit {
    let path = diff_seq(&a.path, &b.path, diff_eq);
    let query_string = diff_map(&a.query_string, &b.query_string, diff_eq);

    if path.is_equal() && query_string.is_equal() {
        Edit::Equal(a.clone())
    } else {
        Edit::Edit(UriFieldEdit { path, query_string })
    }
}

pub type HeadersDiff = Edit<IndexMap<String, String>, IndexMap<String, SeqMapElementEdit<String, Replace<String>>>>;

/// Map diff of strings.
pub fn diff_headers(a: &Headers, b: &Headers) -> HeadersDiff {
    diff_map(&a.0, &b.0, diff_eq)
}

/// The per-field edit of a [`Request`] when it is not wholly equal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestFieldEdit<B, BR> {
    pub version: Edit<String, Replace<String>>,
    pub method: Edit<String, Replace<String>>,
    pub uri: UriEdit,
    pub headers: HeadersDiff,
    pub body: Edit<B, BR>,
}

pub type RequestEdit<B, BR> = Edit<Request<B>, RequestFieldEdit<B, BR>>;

/// Diffs `version`, `method`, `uri`, `headers`, `body` (body via
/// caller-supplied differ so JSON trees can be used).
pub fn diff_request<B, BR>(
    a: &Request<B>,
    b: &Request<B>,
    body_differ: impl Fn(&B, &B) -> Edit<B, BR>,
) -> RequestEdit<B, BR>
where
    B: Clone + PartialEq,
{
    let version = diff_eq(&a.version, &b.version);
    let method = diff_eq(&a.method, &b.method);
    let uri = diff_uri(&a.uri, &b.uri);
    let headers = diff_headers(&a.headers, &b.headers);
    let body = body_differ(&a.body, &b.body);

    if version.is_equal() && method.is_equal() && uri.is_equal() && headers.is_equal() && body.is_equal() {
        Edit::Equal(a.clone())
    } else {
        Edit::Edit(RequestFieldEdit {
            version,
            method,
            uri,
            headers,
            body,
        })
    }
}

/// The per-field edit of a [`Response`] when it is not wholly equal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResponseFieldEdit<B, BR> {
    pub version: Edit<String, Replace<String>>,
    pub status_code: Edit<StatusCode, Replace<StatusCode>>,
    pub status_description: Edit<String, Replace<String>>,
    pub headers: HeadersDiff,
    pub body: Edit<B, BR>,
}

pub type ResponseEdit<B, BR> = Edit<Response<B>, ResponseFieldEdit<B, BR>>;

/// Diffs the same fields as a request plus `statusCode`, `statusDescription`.
pub fn diff_response<B, BR>(
    a: &Response<B>,
    b: &Response<B>,
    body_differ: impl Fn(&B, &B) -> Edit<B, BR>,
) -> ResponseEdit<B, BR>
where
    B: Clone + PartialEq,
{
    let version = diff_eq(&a.version, &b.version);
    let status_code = diff_eq(&a.status_code, &b.status_code);
    let status_description = diff_eq(&a.status_description, &b.status_description);
    let headers = diff_headers(&a.headers, &b.headers);
    let body = body_differ(&a.body, &b.body);

    if version.is_equal()
        && status_code.is_equal()
        && status_description.is_equal()
        && headers.is_equal()
        && body.is_equal()
    {
        Edit::Equal(a.clone())
    } else {
        Edit::Edit(ResponseFieldEdit {
            version,
            status_code,
            status_description,
            headers,
            body,
        })
    }
}

/// The per-field edit of a [`RequestResponse`] pair when it is not wholly equal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairFieldEdit<B, BR> {
    pub request: RequestEdit<B, BR>,
    pub response: OptionEdit<Response<B>, ResponseFieldEdit<B, BR>>,
}

pub type PairEdit<B, BR> = Edit<RequestResponse<B>, PairFieldEdit<B, BR>>;

/// Request diff + option diff of response.
pub fn diff_pair<B, BR>(
    a: &RequestResponse<B>,
    b: &RequestResponse<B>,
    body_differ: impl Fn(&B, &B) -> Edit<B, BR> + Copy,
) -> PairEdit<B, BR>
where
    B: Clone + PartialEq,
{
    let request = diff_request(&a.request, &b.request, body_differ);
    let response = diff_option(&a.response, &b.response, |x, y| diff_response(x, y, body_differ));

    if request.is_equal() && response.is_equal() {
        Edit::Equal(a.clone())
    } else {
        Edit::Edit(PairFieldEdit { request, response })
    }
}

pub type HttpSeqEdit<B, BR> =
    Edit<HttpSeq<B>, Vec<SeqMapElementEdit<RequestResponse<B>, PairFieldEdit<B, BR>>>>;

/// Sequence diff of one test sequence's request/response pairs.
pub fn diff_http_seq<B, BR>(
    a: &HttpSeq<B>,
    b: &HttpSeq<B>,
    body_differ: impl Fn(&B, &B) -> Edit<B, BR> + Copy,
) -> HttpSeqEdit<B, BR>
where
    B: Clone + PartialEq,
{
    match diff_seq(&a.0, &b.0, |x, y| diff_pair(x, y, body_differ)) {
        Edit::Equal(pairs) => Edit::Equal(HttpSeq::new(pairs)),
        Edit::Edit(script) => Edit::Edit(script),
    }
}

pub type LogEdit<B, BR> = Edit<
    Log<B>,
    Vec<SeqMapElementEdit<HttpSeq<B>, Vec<SeqMapElementEdit<RequestResponse<B>, PairFieldEdit<B, BR>>>>>,
>;

/// Sequence diff of `HttpSeq`s.
pub fn diff_log<B, BR>(
    a: &Log<B>,
    b: &Log<B>,
    body_differ: impl Fn(&B, &B) -> Edit<B, BR> + Copy,
) -> LogEdit<B, BR>
where
    B: Clone + PartialEq,
{
    match diff_seq(&a.0, &b.0, |x, y| diff_http_seq(x, y, body_differ)) {
        Edit::Equal(seqs) => Edit::Equal(Log::new(seqs)),
        Edit::Edit(script) => Edit::Edit(script),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_diff_combines_path_sequence_edit_and_query_map_edit() {
        // u1 = /a/b/c?x=1&y=2, u2 = /a/B/c?x=1&z=3
        let u1 = Uri::parse("/a/b/c?x=1&y=2").unwrap();
        let u2 = Uri::parse("/a/B/c?x=1&z=3").unwrap();

        let Edit::Edit(edit) = diff_uri(&u1, &u2) else {
            panic!("expected an edit");
        };

        let Edit::Edit(path_script) = edit.path else {
            panic!("expected path to differ");
        };
        assert_eq!(path_script[0], SeqMapElementEdit::Equal("".to_string()));
        assert_eq!(path_script[1], SeqMapElementEdit::Equal("a".to_string()));
        assert_eq!(
            path_script[2],
            SeqMapElementEdit::Edit(Replace::new("b".to_string(), "B".to_string()))
        );
        assert_eq!(path_script[3], SeqMapElementEdit::Equal("c".to_string()));

        let Edit::Edit(query_script) = edit.query_string else {
            panic!("expected query to differ");
        };
        assert_eq!(query_script["x"], SeqMapElementEdit::Equal("1".to_string()));
        assert_eq!(query_script["y"], SeqMapElementEdit::Delete("2".to_string()));
        assert_eq!(query_script["z"], SeqMapElementEdit::Insert("3".to_string()));
    }

    #[test]
    fn headers_diff_collapses_when_all_entries_equal() {
        let mut a = IndexMap::new();
        a.insert("A".to_string(), "1".to_string());
        a.insert("B".to_string(), "2".to_string());
        let headers_a = Headers(a.clone());
        let headers_b = Headers(a);

        assert_eq!(diff_headers(&headers_a, &headers_b), Edit::Equal(headers_a.0));
    }

    #[test]
    fn request_diff_collapses_when_all_fields_equal() {
        let request = Request {
            version: "HTTP/1.1".to_string(),
            method: "GET".to_string(),
            uri: Uri::parse("/a").unwrap(),
            headers: Headers::default(),
            body: "same".to_string(),
        };

        let edit = diff_request(&request, &request, diff_eq);
        assert_eq!(edit, Edit::Equal(request));
    }

    #[test]
    fn known_answer_self_diffs_collapse() {
        let make = |path: &str, body: &str| Request {
            version: "HTTP/1.1".to_string(),
            method: "GET".to_string(),
            uri: Uri::parse(path).unwrap(),
            headers: Headers::default(),
            body: body.to_string(),
        };

        let requests = [make("/a", "x"), make("/a/b?x=1", ""), make("/", "same")];
        crate::testing::assert_all_self_diffs_collapse(&requests, |a, b| diff_request(a, b, diff_eq));
    }

    #[test]
    fn pair_diff_collapses_when_no_response_on_both_sides() {
        let request = Request {
            version: "HTTP/1.1".to_string(),
            method: "GET".to_string(),
            uri: Uri::parse("/a").unwrap(),
            headers: Headers::default(),
            body: String::new(),
        };
        let pair = RequestResponse::new(request, None);

        let edit = diff_pair(&pair, &pair, diff_eq);
        assert_eq!(edit, Edit::Equal(pair));
    }
}
