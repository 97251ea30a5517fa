//! Request signing: sorted `key=value` pairs joined by `&`, the API secret appended, SHA-1, hex.

use sha1::{Digest, Sha1};

/// Signs the given request parameters. Empty values are skipped; `file`, `api_key`,
/// `resource_type` and `cloud_name` must not be passed in.
pub fn api_sign_request(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut pairs: Vec<&(&str, &str)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
