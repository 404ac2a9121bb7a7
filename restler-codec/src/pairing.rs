//! Splits a `LogLine` stream into per-sequence groups and pairs sends with
//! the receives that follow them.

use restler_types::{HttpSeq, Log, LogLine, PairingError, RequestResponse};

/// Splits `lines` into groups at each `SequenceBeginning`; the very first
/// group (everything before the first boundary) is dropped, since nothing
/// in a well-formed transcript precedes the opening boundary.
///
/// Boundary tokens themselves are consumed by the split and do not appear
/// in any group.
pub fn split_on_sequence_boundary(lines: impl IntoIterator<Item = LogLine>) -> Vec<Vec<LogLine>> {
    let mut groups: Vec<Vec<LogLine>> = vec![Vec::new()];

    for line in lines {
        match line {
            LogLine::SequenceBeginning => groups.push(Vec::new()),
            other => groups.last_mut().expect("groups is never empty").push(other),
        }
    }

    groups.remove(0);
    groups
}

/// Pairs each send in `lines` with the receive that immediately follows
/// it, if any. `lines` must contain only `Sending`/`Received` tokens (no
/// `SequenceBeginning`, which [`split_on_sequence_boundary`] has already
/// stripped out).
///
/// - `(Sending, Sending)` yields a pair with no response.
/// - `(Sending, Received)` yields a pair with the response attached.
/// - `(Received, Sending)` — the first token was already consumed as the
///   second half of the previous window, so it is never re-examined here.
/// - A `Received` with no preceding unconsumed `Sending` is fatal.
pub fn pair_log_lines(lines: &[LogLine]) -> Result<Vec<RequestResponse<String>>, PairingError> {
    let mut pairs = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match &lines[i] {
            LogLine::SequenceBeginning => {
                return Err(PairingError::UnexpectedSequenceBoundary { line: i });
            }
            LogLine::Received(_, _) => {
                return Err(PairingError::ReceivedWithoutSending { line: i });
            }
            LogLine::Sending(_, request) => {
                let response = match lines.get(i + 1) {
                    Some(LogLine::Received(_, response)) => {
                        i += 1;
                        Some(response.clone())
                    }
                    _ => None,
                };
                pairs.push(RequestResponse::new(request.clone(), response));
            }
        }

        i += 1;
    }

    Ok(pairs)
}

/// Splits and pairs a full `LogLine` stream into a structured [`Log`].
///
/// A log with no sequences at all is not an error: it is logged and an
/// empty [`Log`] is returned so callers can keep treating "nothing ran"
/// and "nothing failed" as the same shape of result.
pub fn pair_log(lines: impl IntoIterator<Item = LogLine>) -> Result<Log<String>, PairingError> {
    let groups = split_on_sequence_boundary(lines);

    if groups.is_empty() {
        log::warn!("log contains no sequences; returning an empty log");
        return Ok(Log::new(Vec::new()));
    }

    let mut seqs = Vec::with_capacity(groups.len());

    for group in groups {
        seqs.push(HttpSeq::new(pair_log_lines(&group)?));
    }

    Ok(Log::new(seqs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use restler_types::{Headers, Request, Response, StatusCode, Uri};

    fn req() -> Request<String> {
        Request {
            version: "HTTP/1.1".into(),
            method: "GET".into(),
            uri: Uri::default(),
            headers: Headers::default(),
            body: String::new(),
        }
    }

    fn resp() -> Response<String> {
        Response {
            version: "HTTP/1.1".into(),
            status_code: StatusCode::new(200),
            status_description: "OK".into(),
            headers: Headers::default(),
            body: String::new(),
        }
    }

    #[test]
    fn splits_and_drops_leading_empty_group() {
        let lines = vec![
            LogLine::SequenceBeginning,
            LogLine::Sending(Utc::now(), req()),
            LogLine::SequenceBeginning,
            LogLine::Sending(Utc::now(), req()),
        ];
        let groups = split_on_sequence_boundary(lines);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[1].len(), 1);
    }

    #[test]
    fn pairs_send_with_no_response() {
        // Sending A, Sending B, Received R -> (A, None), (B, Some R): a send
        // with no reply still produces a pair, just with no response attached.
        let lines = vec![
            LogLine::Sending(Utc::now(), req()),
            LogLine::Sending(Utc::now(), req()),
            LogLine::Received(Utc::now(), resp()),
        ];
        let pairs = pair_log_lines(&lines).unwrap();
        assert_eq!(pairs.len(), 2);
        assert!(pairs[0].response.is_none());
        assert!(pairs[1].response.is_some());
    }

    #[test]
    fn received_without_sending_is_fatal() {
        let lines = vec![LogLine::Received(Utc::now(), resp())];
        assert!(pair_log_lines(&lines).is_err());
    }

    #[test]
    fn double_received_is_fatal() {
        let lines = vec![
            LogLine::Sending(Utc::now(), req()),
            LogLine::Received(Utc::now(), resp()),
            LogLine::Received(Utc::now(), resp()),
        ];
        assert!(pair_log_lines(&lines).is_err());
    }

    #[test]
    fn pair_count_matches_sending_count() {
        // The pair count of a sequence equals its Sending count, whether or
        // not every send got a reply.
        let lines = vec![
            LogLine::Sending(Utc::now(), req()),
            LogLine::Sending(Utc::now(), req()),
            LogLine::Received(Utc::now(), resp()),
            LogLine::Sending(Utc::now(), req()),
        ];
        let sending_count = lines.iter().filter(|l| matches!(l, LogLine::Sending(_, _))).count();

        let pairs = pair_log_lines(&lines).unwrap();
        assert_eq!(pairs.len(), sending_count);
    }

    #[test]
    fn empty_log_yields_empty_log_not_an_error() {
        let log = pair_log(std::iter::empty()).unwrap();
        assert_eq!(log.iter().count(), 0);
    }
}
