use crate::headers::Headers;
use crate::uri::Uri;

/// An HTTP request. `B` is a parameter of the model so bodies can be raw
/// text, parsed JSON, or anything else the caller cares to represent.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request<B> {
    pub version: String,
    pub method: String,
    pub uri: Uri,
    pub headers: Headers,
    pub body: B,
}

/// An HTTP response.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Response<B> {
    pub version: String,
    pub status_code: StatusCode,
    pub status_description: String,
    pub headers: Headers,
    pub body: B,
}

/// A numeric HTTP status code, newtyped so the failure/bug/warning/unknown
/// taxonomy lives in one place instead of scattered comparisons.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusCode(pub i32);

/// Where a status code falls in the taxonomy used by the run summary and
/// the bucketizer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResponseClass {
    /// Exactly 500.
    Bug,
    /// `code >= 400`, excluding the distinguished unknown code.
    Failure,
    /// `code` in `289..=299`, each with a human-readable tag.
    Warning(&'static str),
    /// `code == 0`: no response code could be determined; treated as a failure.
    Unknown,
    /// Anything else (2xx/3xx success and redirection, non-tagged informational codes).
    Other,
}

impl StatusCode {
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn classify(self) -> ResponseClass {
        match self.0 {
            0 => ResponseClass::Unknown,
            500 => ResponseClass::Bug,
            c if (289..=299).contains(&c) => ResponseClass::Warning(warning_tag(c)),
            c if c >= 400 => ResponseClass::Failure,
            _ => ResponseClass::Other,
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(
            self.classify(),
            ResponseClass::Failure | ResponseClass::Bug | ResponseClass::Unknown
        )
    }

    pub fn is_bug(self) -> bool {
        matches!(self.classify(), ResponseClass::Bug)
    }
}

/// Human-readable tag for the reserved warning range `289..=299`.
///
/// The spec names only 289 ("Warning") and 291 ("DeprecationWarning") as
/// examples; the remaining tags are a reasonable, self-consistent
/// completion of the range (recorded as an open-question resolution).
fn warning_tag(code: i32) -> &'static str {
    match code {
        289 => "Warning",
        290 => "MiscellaneousPersistentWarning",
        291 => "DeprecationWarning",
        292 => "ExperimentalFeatureWarning",
        293 => "TransientWarning",
        294 => "CompatibilityWarning",
        295 => "PerformanceWarning",
        296 => "SecurityWarning",
        297 => "RateLimitWarning",
        298 => "ResourceUsageWarning",
        299 => "MiscellaneousWarning",
        _ => "Warning",
    }
}

impl<B> Response<B> {
    pub fn classify(&self) -> ResponseClass {
        self.status_code.classify()
    }
}

/// A single send paired with the response that followed it, if any.
///
/// A pair with `response: None` represents a send for which no reply was
/// observed before the next send or end-of-sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestResponse<B> {
    pub request: Request<B>,
    pub response: Option<Response<B>>,
}

impl<B> RequestResponse<B> {
    pub fn new(request: Request<B>, response: Option<Response<B>>) -> Self {
        Self { request, response }
    }
}

/// One test sequence: an ordered run of request/response pairs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HttpSeq<B>(pub Vec<RequestResponse<B>>);

impl<B> HttpSeq<B> {
    pub fn new(pairs: Vec<RequestResponse<B>>) -> Self {
        Self(pairs)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RequestResponse<B>> {
        self.0.iter()
    }
}

/// An ordered sequence of test sequences: the structured form of a full
/// fuzzing run transcript.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Log<B>(pub Vec<HttpSeq<B>>);

impl<B> Log<B> {
    pub fn new(seqs: Vec<HttpSeq<B>>) -> Self {
        Self(seqs)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HttpSeq<B>> {
        self.0.iter()
    }
}
