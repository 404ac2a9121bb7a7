//! The base HTTP message parser: splits a raw message into start line,
//! headers, and body, and produces [`Request`]/[`Response`] values with a
//! raw `String` body. Higher-level body parsing (e.g. JSON) is the
//! caller's concern — it operates on the `body` field after the fact.

use restler_types::error::HttpParseErrorKind;
use restler_types::{HttpParseError, Headers, Request, Response, StatusCode, Uri};

/// Splits `message` once on `\r\n\r\n` into the start-line-plus-headers
/// block and the body, then splits the first part once on `\r\n` into the
/// start line and the headers block.
fn split_message(message: &str) -> Result<(&str, &str, &str), HttpParseError> {
    let (head, body) = message
        .split_once("\r\n\r\n")
        .ok_or(HttpParseErrorKind::MissingHeaderBodySeparator)?;

    let (start_line, headers_block) = head.split_once("\r\n").unwrap_or((head, ""));

    Ok((start_line, headers_block, body))
}

/// Parses a raw request message: `METHOD URI VERSION` start line, headers,
/// and a raw string body.
pub fn parse_request(message: &str) -> Result<Request<String>, HttpParseError> {
    let (start_line, headers_block, body) = split_message(message)?;

    let tokens: Vec<&str> = start_line.split(' ').collect();
    let [method, uri, version] = tokens.as_slice() else {
        return Err(HttpParseErrorKind::MalformedRequestLine {
            line: start_line.to_owned(),
        }
        .into());
    };

    let uri = Uri::parse(uri)?;
    let headers = Headers::parse(headers_block)?;

    Ok(Request {
        version: version.to_string(),
        method: method.to_string(),
        uri,
        headers,
        body: body.to_owned(),
    })
}

/// Parses a raw response message: `VERSION CODE DESCRIPTION` start line
/// (description is the tail after splitting at most twice, so it may
/// contain spaces), headers, and a raw string body.
pub fn parse_response(message: &str) -> Result<Response<String>, HttpParseError> {
    let (start_line, headers_block, body) = split_message(message)?;

    let mut parts = start_line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    let code = parts.next().ok_or_else(|| HttpParseErrorKind::MalformedResponseLine {
        line: start_line.to_owned(),
    })?;
    let description = parts.next().unwrap_or_default();

    let code: i32 = code
        .parse()
        .map_err(|_| HttpParseErrorKind::InvalidStatusCode { raw: code.to_owned() })?;

    let headers = Headers::parse(headers_block)?;

    Ok(Response {
        version: version.to_owned(),
        status_code: StatusCode::new(code),
        status_description: description.to_owned(),
        headers,
        body: body.to_owned(),
    })
}

impl From<HttpParseErrorKind> for HttpParseError {
    fn from(kind: HttpParseErrorKind) -> Self {
        HttpParseError::new(kind)
    }
}
