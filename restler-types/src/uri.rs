use indexmap::IndexMap;

use crate::error::{HttpParseError, HttpParseErrorKind};

/// A parsed request-target: an ordered list of path segments plus a
/// query-string mapping, preserving insertion order of the query keys.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uri {
    pub path: Vec<String>,
    pub query_string: IndexMap<String, String>,
}

impl Uri {
    pub fn new(path: Vec<String>, query_string: IndexMap<String, String>) -> Self {
        Self { path, query_string }
    }

    /// Splits once on `?`; the left side becomes path segments split on `/`,
    /// the right side becomes the query mapping (duplicates collapse to the
    /// last value, per standard query-string semantics).
    ///
    /// Fails if more than one `?` appears.
    pub fn parse(s: &str) -> Result<Self, HttpParseError> {
        let mut parts = s.splitn(2, '?');
        let path_part = parts.next().unwrap_or_default();
        let query_part = parts.next();

        if let Some(query_part) = query_part {
            if query_part.contains('?') {
                return Err(HttpParseErrorKind::MultipleQuerySeparators.into());
            }
        }

        let path = path_part.split('/').map(str::to_owned).collect();
        let query_string = query_part.map(parse_query_string).unwrap_or_default();

        Ok(Self { path, query_string })
    }

    /// Renders `path` components joined by `/`, then `?` iff the query
    /// mapping is non-empty, followed by `name=value` pairs joined by `&`.
    pub fn render(&self) -> String {
        let mut out = self.path.join("/");

        if !self.query_string.is_empty() {
            out.push('?');
            let pairs: Vec<String> = self
                .query_string
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            out.push_str(&pairs.join("&"));
        }

        out
    }
}

fn parse_query_string(s: &str) -> IndexMap<String, String> {
    let mut map = IndexMap::new();

    if s.is_empty() {
        return map;
    }

    for pair in s.split('&') {
        let mut kv = pair.splitn(2, '=');
        let key = kv.next().unwrap_or_default().to_owned();
        let value = kv.next().unwrap_or_default().to_owned();
        map.insert(key, value);
    }

    map
}

impl From<HttpParseErrorKind> for HttpParseError {
    fn from(kind: HttpParseErrorKind) -> Self {
        HttpParseError::new(kind)
    }
}
