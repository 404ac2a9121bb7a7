//! Deterministic request fingerprinting.
//!
//! A fixed 128-bit hash (the first 16 bytes of SHA-1 of the request's UTF-8
//! text form) identifies a request across runs. The choice of SHA-1 is
//! fixed because existing tooling persists these fingerprints; it is not a
//! substitutable implementation detail.

use restler_types::Request;
use sha1::{Digest, Sha1};

/// A stable 128-bit fingerprint of a request, for cross-run identity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RequestFingerprint(pub [u8; 16]);

impl RequestFingerprint {
    pub fn to_hex(self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

/// Hashes a canonical text rendering of `request`: method, rendered URI,
/// headers in iteration order, then body, each on its own line.
pub fn request_fingerprint(request: &Request<String>) -> RequestFingerprint {
    let mut canonical = String::new();
    canonical.push_str(&request.method);
    canonical.push('\n');
    canonical.push_str(&request.uri.render());
    canonical.push('\n');
    for (name, value) in request.headers.iter() {
        canonical.push_str(name);
        canonical.push(':');
        canonical.push_str(value);
        canonical.push('\n');
    }
    canonical.push_str(&request.body);

    let mut hasher = Sha1::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    RequestFingerprint(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use restler_types::{Headers, Uri};

    fn request(body: &str) -> Request<String> {
        Request {
            version: "HTTP/1.1".into(),
            method: "GET".into(),
            uri: Uri::parse("/a/b").unwrap(),
            headers: Headers::default(),
            body: body.into(),
        }
    }

    #[test]
    fn same_request_hashes_the_same() {
        // The hash depends only on the request value, not identity or call order.
        assert_eq!(
            request_fingerprint(&request("x")),
            request_fingerprint(&request("x"))
        );
    }

    #[test]
    fn different_bodies_hash_differently() {
        assert_ne!(
            request_fingerprint(&request("x")),
            request_fingerprint(&request("y"))
        );
    }

    #[test]
    fn hex_encoding_is_32_chars() {
        assert_eq!(request_fingerprint(&request("x")).to_hex().len(), 32);
    }
}
