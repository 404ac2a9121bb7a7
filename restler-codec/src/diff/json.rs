//! A concrete body differ for JSON-valued bodies: `diff_json` instantiates
//! the generic edit-script algebra over `serde_json::Value` trees instead
//! of treating a JSON body as an opaque string to be replaced wholesale.

use indexmap::IndexMap;
use restler_types::diff::{diff_map, diff_seq};
use restler_types::{Edit, Replace, SeqMapElementEdit};
use serde_json::Value;

/// The recursive edit of a JSON value that is not wholly equal to its
/// counterpart: either both sides are the same JSON kind and differ
/// structurally (`Array`/`Object`), or they differ in kind or scalar value
/// (`Scalar`, a whole-value replace).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JsonEdit {
    Scalar(Replace<Value>),
    Array(Vec<SeqMapElementEdit<Value, JsonEdit>>),
    Object(IndexMap<String, SeqMapElementEdit<Value, JsonEdit>>),
}

/// Diffs two JSON values. Arrays are diffed positionally (via [`diff_seq`]);
/// objects are diffed by key (via [`diff_map`]); anything else, including a
/// kind change (e.g. a field that used to be a number and is now an
/// object), falls back to a whole-value [`Replace`].
pub fn diff_json(a: &Value, b: &Value) -> Edit<Value, JsonEdit> {
    if a == b {
        return Edit::Equal(a.clone());
    }

    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            let Edit::Edit(script) = diff_seq(xs, ys, diff_json) else {
                unreachable!("a != b, so the arrays cannot turn out equal");
            };
            Edit::Edit(JsonEdit::Array(script))
        }
        (Value::Object(xo), Value::Object(yo)) => {
            let am: IndexMap<String, Value> = xo.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            let bm: IndexMap<String, Value> = yo.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

            let Edit::Edit(script) = diff_map(&am, &bm, diff_json) else {
                unreachable!("a != b, so the objects cannot turn out equal");
            };
            Edit::Edit(JsonEdit::Object(script))
        }
        _ => Edit::Edit(JsonEdit::Scalar(Replace::new(a.clone(), b.clone()))),
    }
}
