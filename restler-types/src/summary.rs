use indexmap::IndexMap;
use uuid::Uuid;

use crate::logline::RequestExecutionSummary;

/// A freshly generated identifier for one error bucket. Stable within a
/// process, not across processes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketId(pub Uuid);

impl BucketId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BucketId {
    fn default() -> Self {
        Self::new()
    }
}

/// One similarity cluster of failing responses for a single status code.
///
/// Members are stored in reverse insertion order: the most recently
/// assigned summary is first, matching the "prepend to the bucket" rule
/// of the assignment algorithm.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bucket {
    pub members: Vec<RequestExecutionSummary>,
}

impl Bucket {
    pub fn new() -> Self {
        Self { members: Vec::new() }
    }

    pub fn prepend(&mut self, summary: RequestExecutionSummary) {
        self.members.insert(0, summary);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The first `n` members in insertion order (i.e. the *last* `n`
    /// elements of `members`, since members are stored reverse-inserted),
    /// used to bound the cost of similarity comparisons.
    pub fn analyzed_prefix(&self, n: usize) -> impl Iterator<Item = &RequestExecutionSummary> {
        self.members.iter().rev().take(n)
    }
}

/// The fixed constants that drive bucket assignment, reified as data
/// instead of literals scattered through the algorithm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketizerConfig {
    pub max_bucket_count_per_code: usize,
    pub distance_bound: f64,
    pub ngram_size: usize,
    pub max_bucket_size_to_analyze: usize,
    pub delimiters: Vec<char>,
}

impl Default for BucketizerConfig {
    fn default() -> Self {
        Self {
            max_bucket_count_per_code: 100,
            distance_bound: 0.5,
            ngram_size: 5,
            max_bucket_size_to_analyze: 5,
            delimiters: " /:\\\",-';.<>!\r\n".chars().collect(),
        }
    }
}

/// Reduction of a bucketized run into counts for reporting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub failed_requests_count: usize,
    pub bug_count: usize,
    pub code_counts: IndexMap<i32, usize>,
    pub error_buckets: IndexMap<(i32, BucketId), usize>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for RunSummary {
    /// `(code, bucketId)` is not a valid JSON object key on its own, so
    /// `error_buckets` is rendered with a flattened `"<code>:<bucket-id>"`
    /// string key instead of a derived tuple key.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let error_buckets: IndexMap<String, usize> = self
            .error_buckets
            .iter()
            .map(|((code, bucket_id), count)| (format!("{code}:{}", bucket_id.0), *count))
            .collect();

        let mut state = serializer.serialize_struct("RunSummary", 4)?;
        state.serialize_field("failed_requests_count", &self.failed_requests_count)?;
        state.serialize_field("bug_count", &self.bug_count)?;
        state.serialize_field("code_counts", &self.code_counts)?;
        state.serialize_field("error_buckets", &error_buckets)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_fixed_constants() {
        let config = BucketizerConfig::default();
        assert_eq!(config.max_bucket_count_per_code, 100);
        assert_eq!(config.distance_bound, 0.5);
        assert_eq!(config.ngram_size, 5);
        assert_eq!(config.max_bucket_size_to_analyze, 5);
        assert!(config.delimiters.contains(&'\\'));
        assert!(config.delimiters.contains(&' '));
    }

    #[test]
    fn bucket_prepend_reverses_insertion_order() {
        use crate::logline::{RequestTrace, ResponseTrace};

        let mut bucket = Bucket::new();
        let make = |body: &str| {
            RequestExecutionSummary::new(
                RequestTrace::RequestData {
                    method: "GET".into(),
                    path: "items".into(),
                    query: IndexMap::new(),
                    body: String::new(),
                },
                ResponseTrace::ResponseData {
                    code: 500,
                    code_description: "Error".into(),
                    content: body.into(),
                },
            )
        };

        bucket.prepend(make("first"));
        bucket.prepend(make("second"));

        assert_eq!(bucket.members.len(), 2);
        let ResponseTrace::ResponseData { content, .. } = &bucket.members[0].response;
        assert_eq!(content, "second");
    }
}
