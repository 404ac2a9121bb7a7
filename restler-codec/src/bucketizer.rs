//! Online similarity-based clustering of failing responses.
//!
//! For each status code, failing responses are compared against the first
//! few members of each existing bucket (for that code) by Jaccard
//! similarity over generalized n-grams of the response body, and assigned
//! to the most similar bucket, a fresh bucket, or dropped on overflow.

use std::collections::HashMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use restler_types::logline::{RequestExecutionSummary, RequestTrace, ResponseTrace};
use restler_types::{Bucket, BucketId, BucketizerConfig, Log, Request, Response};

/// Observes summaries dropped because a status code's bucket count has
/// reached [`BucketizerConfig::max_bucket_count_per_code`].
///
/// The default entry point ([`bucketize`] called with `None`) still logs
/// an overflow diagnostic through the `log` facade; this trait only adds a
/// way for a caller to *also* observe the loss without changing behavior.
pub trait BucketOverflow {
    fn on_overflow(&mut self, code: i32, summary: &RequestExecutionSummary);
}

/// Clusters the failing responses of `log` per status code.
///
/// `observer`, if given, is invoked once per summary dropped due to bucket
/// overflow, in addition to the diagnostic that is always logged.
pub fn bucketize(
    log: &Log<String>,
    config: &BucketizerConfig,
    mut observer: Option<&mut dyn BucketOverflow>,
) -> IndexMap<i32, IndexMap<BucketId, Bucket>> {
    let mut by_code: IndexMap<i32, Vec<RequestExecutionSummary>> = IndexMap::new();

    for seq in log.iter() {
        for pair in seq.iter() {
            let Some(response) = &pair.response else {
                continue;
            };
            if !response.status_code.is_failure() {
                continue;
            }
            let summary = build_summary(&pair.request, response);
            by_code
                .entry(response.status_code.value())
                .or_default()
                .push(summary);
        }
    }

    let mut result = IndexMap::new();

    for (code, summaries) in by_code {
        let mut cache = NgramCache::new();
        let buckets = assign_buckets(code, summaries, config, &mut cache, observer.as_deref_mut());
        result.insert(code, buckets);
    }

    result
}

fn build_summary(request: &Request<String>, response: &Response<String>) -> RequestExecutionSummary {
    let path = request
        .uri
        .path
        .iter()
        .filter(|segment| !segment.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("/");

    let query = request.uri.query_string.clone();

    RequestExecutionSummary::new(
        RequestTrace::RequestData {
            method: request.method.clone(),
            path,
            query,
            body: request.body.clone(),
        },
        ResponseTrace::ResponseData {
            code: response.status_code.value(),
            code_description: response.status_description.clone(),
            content: response.body.clone(),
        },
    )
}

fn assign_buckets(
    code: i32,
    summaries: Vec<RequestExecutionSummary>,
    config: &BucketizerConfig,
    cache: &mut NgramCache,
    mut observer: Option<&mut dyn BucketOverflow>,
) -> IndexMap<BucketId, Bucket> {
    let mut buckets: IndexMap<BucketId, Bucket> = IndexMap::new();

    for summary in summaries {
        let body = response_body(&summary);

        if buckets.is_empty() {
            let mut bucket = Bucket::new();
            bucket.prepend(summary);
            buckets.insert(BucketId::new(), bucket);
            continue;
        }

        let mut best: Option<(BucketId, f64)> = None;
        for (id, bucket) in &buckets {
            let similarity = bucket
                .analyzed_prefix(config.max_bucket_size_to_analyze)
                .map(|member| jaccard(cache.ngrams(body, config), cache.ngrams(response_body(member), config)))
                .fold(0.0_f64, f64::max);

            if best.map(|(_, s)| similarity > s).unwrap_or(true) {
                best = Some((*id, similarity));
            }
        }

        let (best_id, best_similarity) = best.expect("buckets is non-empty");

        if best_similarity > config.distance_bound {
            buckets
                .get_mut(&best_id)
                .expect("best_id came from buckets")
                .prepend(summary);
        } else if buckets.len() < config.max_bucket_count_per_code {
            let mut bucket = Bucket::new();
            bucket.prepend(summary);
            buckets.insert(BucketId::new(), bucket);
        } else {
            log::warn!(
                "bucket overflow for status code {code}: dropping a summary past {} buckets",
                config.max_bucket_count_per_code
            );
            if let Some(observer) = observer.as_deref_mut() {
                observer.on_overflow(code, &summary);
            }
        }
    }

    buckets
}

fn response_body(summary: &RequestExecutionSummary) -> &str {
    let ResponseTrace::ResponseData { content, .. } = &summary.response;
    content
}

/// An n-gram memo cache keyed by the raw (post-escape-decoding) response
/// body, shared across all comparisons within one bucketization pass.
struct NgramCache {
    memo: HashMap<String, IndexMap<String, usize>>,
}

impl NgramCache {
    fn new() -> Self {
        Self { memo: HashMap::new() }
    }

    fn ngrams(&mut self, body: &str, config: &BucketizerConfig) -> &IndexMap<String, usize> {
        if !self.memo.contains_key(body) {
            let ngrams = generate_ngrams(body, config);
            self.memo.insert(body.to_owned(), ngrams);
        }
        self.memo.get(body).expect("just inserted")
    }
}

/// GUID literals contain hyphens, which are themselves word delimiters; a
/// plain split-then-parse pipeline would shatter a GUID into five
/// non-GUID-shaped hex runs before generalization ever saw it. GUIDs are
/// therefore recognized against the whole body first, and the matched span
/// is replaced with the literal word `guid` so the later delimiter split
/// sees it as one already-generalized token.
static GUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap()
});

/// Splits `body` on delimiter characters, generalizes primitive-looking
/// words, drops tokens of length <= 1, then slides a `ngram_size` window
/// across the remaining tokens, counting occurrences of each distinct
/// n-gram (n-grams are comma-joined token strings).
fn generate_ngrams(body: &str, config: &BucketizerConfig) -> IndexMap<String, usize> {
    let body = GUID_PATTERN.replace_all(body, "guid");

    let tokens: Vec<String> = body
        .split(|c: char| config.delimiters.contains(&c))
        .filter(|word| !word.is_empty())
        .map(generalize_token)
        .filter(|token| token.trim().len() > 1)
        .collect();

    let mut ngrams = IndexMap::new();

    if tokens.len() < config.ngram_size {
        return ngrams;
    }

    for window in tokens.windows(config.ngram_size) {
        let key = window.join(",");
        *ngrams.entry(key).or_insert(0) += 1;
    }

    ngrams
}

/// Replaces a word that parses as a GUID, signed 64-bit integer, unsigned
/// 64-bit integer, or double with a generic token, in that order; keeps
/// the original word otherwise.
fn generalize_token(word: &str) -> String {
    if uuid::Uuid::parse_str(word).is_ok() {
        return "guid".to_string();
    }
    if word.parse::<i64>().is_ok() {
        return "int64".to_string();
    }
    if word.parse::<u64>().is_ok() {
        return "uint64".to_string();
    }
    if word.parse::<f64>().is_ok() {
        return "double".to_string();
    }
    word.to_string()
}

/// Jaccard similarity of two n-gram collections treated as unordered sets
/// (occurrence counts collected during extraction are not weighted in).
/// An empty union is treated as similarity 0, not undefined.
fn jaccard(a: &IndexMap<String, usize>, b: &IndexMap<String, usize>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let intersection = a.keys().filter(|k| b.contains_key(*k)).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
