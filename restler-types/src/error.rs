use thiserror::Error;

/// A recoverable failure while parsing a URI, header block, or HTTP message.
///
/// Callers are expected to log this and move on (see the `log` facade calls
/// in `restler-codec`); nothing in this crate panics or aborts on it.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind}")]
pub struct HttpParseError {
    kind: HttpParseErrorKind,
}

impl HttpParseError {
    pub fn new(kind: HttpParseErrorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &HttpParseErrorKind {
        &self.kind
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum HttpParseErrorKind {
    #[error("uri contains more than one '?'")]
    MultipleQuerySeparators,
    #[error("header line is missing a ':' separator: {line:?}")]
    MissingColon { line: String },
    #[error("message is missing the CRLF CRLF header/body separator")]
    MissingHeaderBodySeparator,
    #[error("request line does not have exactly three tokens: {line:?}")]
    MalformedRequestLine { line: String },
    #[error("response line does not have a parseable status code: {line:?}")]
    MalformedResponseLine { line: String },
    #[error("status code {raw:?} is not an integer")]
    InvalidStatusCode { raw: String },
}

/// A fatal error while pairing sends and receives within one sequence.
///
/// Unlike [`HttpParseError`], this is never swallowed: a `Received` with no
/// preceding `Sending` means the transcript itself is malformed and further
/// analysis of the sequence is meaningless.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PairingError {
    #[error("received a response with no prior send (line {line})")]
    ReceivedWithoutSending { line: usize },
    #[error("internal invariant violated: sequence boundary reached the pairing stage (line {line})")]
    UnexpectedSequenceBoundary { line: usize },
}
