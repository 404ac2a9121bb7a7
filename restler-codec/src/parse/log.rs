//! Classifies raw transcript lines into [`LogLine`] tokens.
//!
//! Three regular expressions decide the shape of a line; everything else is
//! silently ignored, per the wire format. This mirrors the `Vec<(T, Regex)>`
//! table a BGP lab log parser in the retrieval pack uses to classify its
//! own transcript lines.

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use restler_types::LogLine;

use super::http::{parse_request, parse_response};

static SEQUENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Generation-\d+: Rendering Sequence-\d+").unwrap());
static SENDING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^']*): Sending: '(.*)'$").unwrap());
static RECEIVED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^']*): Received: '(.*)'$").unwrap());

const TIMESTAMP_FORMATS: &[&str] = &["%a %b %d %H:%M:%S %Y", "%a %b %e %H:%M:%S %Y", "%Y-%m-%d %H:%M:%S%.3f"];

/// Classifies one raw transcript line, or `None` if it matches none of the
/// three recognized shapes (silently ignored per the wire format).
///
/// `line_number` is used only for diagnostics.
pub fn parse_log_line(line: &str, line_number: usize) -> Option<LogLine> {
    if SEQUENCE_BOUNDARY.is_match(line) {
        return Some(LogLine::SequenceBeginning);
    }

    if let Some(captures) = SENDING.captures(line) {
        let time = parse_timestamp(captures.get(1).unwrap().as_str(), line_number);
        let text = decode_escapes(captures.get(2).unwrap().as_str());

        return match parse_request(&text) {
            Ok(request) => Some(LogLine::Sending(time, request)),
            Err(err) => {
                log::warn!("line {line_number}: could not parse sent request: {err}");
                None
            }
        };
    }

    if let Some(captures) = RECEIVED.captures(line) {
        let time = parse_timestamp(captures.get(1).unwrap().as_str(), line_number);
        let text = decode_escapes(captures.get(2).unwrap().as_str());

        return match parse_response(&text) {
            Ok(response) => Some(LogLine::Received(time, response)),
            Err(err) => {
                log::warn!("line {line_number}: could not parse received response: {err}");
                None
            }
        };
    }

    None
}

/// Tries each of the three accepted timestamp formats in order, with
/// whitespace tolerance; falls back to "now" and logs an error rather than
/// aborting the run.
fn parse_timestamp(raw: &str, line_number: usize) -> DateTime<Utc> {
    let trimmed = raw.trim();
    let normalized = {
        let mut out = String::with_capacity(trimmed.len());
        let mut prev_space = false;
        for c in trimmed.chars() {
            if c.is_whitespace() {
                if !prev_space {
                    out.push(' ');
                }
                prev_space = true;
            } else {
                out.push(c);
                prev_space = false;
            }
        }
        out
    };

    for format in TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return DateTime::from_naive_utc_and_offset(naive, Utc);
        }
    }

    log::error!("line {line_number}: could not parse timestamp {raw:?}, falling back to now");
    Utc::now()
}

/// Decodes the four escape sequences used in transcript-embedded HTTP text:
/// `\r`, `\n`, `\t`, `\\`.
fn decode_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
