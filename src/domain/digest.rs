//! Keyed digest shared by every signed exchange with the gateway.
//!
//! The gateway authenticates a message by hashing its fields in a fixed order,
//! with the shop secret appended last, and comparing lowercase hex digests.
//! Fields are concatenated without separators: `("ab", "c")` and `("a", "bc")`
//! produce the same digest. That ambiguity is part of the wire format and the
//! gateway would reject anything else.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Hash primitive used for a signature.
///
/// Payment creation and lookup are always signed with SHA-1; the live gateway
/// computes the same digest on its side, so this cannot be upgraded
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha1,
    Md5,
}

/// Hashes `fields` in order followed by `secret` and returns the lowercase hex digest.
pub fn sign_fields<'a, I>(algorithm: DigestAlgorithm, fields: I, secret: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    match algorithm {
        DigestAlgorithm::Sha1 => digest_hex::<Sha1, I>(fields, secret),
        DigestAlgorithm::Md5 => digest_hex::<Md5, I>(fields, secret),
    }
}

fn digest_hex<'a, D, I>(fields: I, secret: &str) -> String
where
    D: Digest,
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = D::new();
    for field in fields {
        hasher.update(field.as_bytes());
    }
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
