use indexmap::IndexMap;

use crate::error::{HttpParseError, HttpParseErrorKind};

/// The sentinel value that marks a header as redacted; any header line
/// whose value (after the first `:`) equals this literal is dropped
/// entirely during parsing rather than retained with that value.
pub const OMITTED_AUTH_TOKEN: &str = "_OMITTED_AUTH_TOKEN_";

/// An ordered, case-preserving mapping from header name to header value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Headers(pub IndexMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.0.get(name)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Splits `block` on CRLF; each non-empty line is split on the first
    /// `:` and the value is trimmed. A header whose trimmed value equals
    /// [`OMITTED_AUTH_TOKEN`] is dropped. A line with no `:` fails the
    /// whole block.
    pub fn parse(block: &str) -> Result<Self, HttpParseError> {
        let mut map = IndexMap::new();

        for line in block.split("\r\n") {
            if line.is_empty() {
                continue;
            }

            let mut kv = line.splitn(2, ':');
            let name = kv.next().unwrap_or_default();
            let value = kv.next().ok_or_else(|| {
                HttpParseErrorKind::MissingColon {
                    line: line.to_owned(),
                }
            })?;
            let value = value.trim();

            if value == OMITTED_AUTH_TOKEN {
                continue;
            }

            map.insert(name.to_owned(), value.to_owned());
        }

        Ok(Self(map))
    }
}

impl From<HttpParseErrorKind> for HttpParseError {
    fn from(kind: HttpParseErrorKind) -> Self {
        HttpParseError::new(kind)
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
