//! Reduces bucketized results into the counts a report renders.

use indexmap::IndexMap;
use restler_types::{Bucket, BucketId, Log, RunSummary};

/// Builds a [`RunSummary`] from a log and its bucketization.
///
/// `code_counts[c]` is the number of well-formed responses with code `c`;
/// `failed_requests_count` sums the counts of failure-class codes;
/// `bug_count` is the count of exactly-500 responses; `error_buckets`
/// records the size of every bucket, keyed by `(code, bucket id)`.
pub fn reduce_run_summary(
    log: &Log<String>,
    buckets: &IndexMap<i32, IndexMap<BucketId, Bucket>>,
) -> RunSummary {
    let mut code_counts: IndexMap<i32, usize> = IndexMap::new();
    let mut failed_requests_count = 0;
    let mut bug_count = 0;

    for seq in log.iter() {
        for pair in seq.iter() {
            let Some(response) = &pair.response else {
                continue;
            };

            let code = response.status_code.value();
            *code_counts.entry(code).or_insert(0) += 1;

            if response.status_code.is_failure() {
                failed_requests_count += 1;
            }
            if response.status_code.is_bug() {
                bug_count += 1;
            }
        }
    }

    let mut error_buckets = IndexMap::new();
    for (code, by_id) in buckets {
        for (id, bucket) in by_id {
            error_buckets.insert((*code, *id), bucket.len());
        }
    }

    RunSummary {
        failed_requests_count,
        bug_count,
        code_counts,
        error_buckets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restler_types::{Headers, Request, RequestResponse, Response, StatusCode, Uri};

    fn seq_with_codes(codes: &[i32]) -> Log<String> {
        use restler_types::HttpSeq;

        let pairs = codes
            .iter()
            .map(|&code| RequestResponse {
                request: Request {
                    version: "HTTP/1.1".into(),
                    method: "GET".into(),
                    uri: Uri::default(),
                    headers: Headers::default(),
                    body: String::new(),
                },
                response: Some(Response {
                    version: "HTTP/1.1".into(),
                    status_code: StatusCode::new(code),
                    status_description: String::new(),
                    headers: Headers::default(),
                    body: String::new(),
                }),
            })
            .collect();

        Log::new(vec![HttpSeq::new(pairs)])
    }

    #[test]
    fn counts_codes_failures_and_bugs() {
        let log = seq_with_codes(&[200, 404, 500, 500, 200]);
        let summary = reduce_run_summary(&log, &IndexMap::new());

        assert_eq!(summary.code_counts.get(&200), Some(&2));
        assert_eq!(summary.code_counts.get(&404), Some(&1));
        assert_eq!(summary.code_counts.get(&500), Some(&2));
        assert_eq!(summary.failed_requests_count, 3);
        assert_eq!(summary.bug_count, 2);
    }

    #[test]
    fn error_buckets_are_sized_per_bucket() {
        let log = seq_with_codes(&[500]);

        let mut bucket = Bucket::new();
        bucket.members.push(restler_types::RequestExecutionSummary::new(
            restler_types::RequestTrace::RequestData {
                method: "GET".into(),
                path: "items".into(),
                query: IndexMap::new(),
                body: String::new(),
            },
            restler_types::ResponseTrace::ResponseData {
                code: 500,
                code_description: "Internal Server Error".into(),
                content: "resp".into(),
            },
        ));
        let id = BucketId::new();
        let mut by_id = IndexMap::new();
        by_id.insert(id, bucket);
        let mut buckets = IndexMap::new();
        buckets.insert(500, by_id);

        let summary = reduce_run_summary(&log, &buckets);
        assert_eq!(summary.error_buckets.get(&(500, id)), Some(&1));
    }
}
