// ABOUTME: OAuth 1.0 PLAINTEXT authorization header for the MAAS API.
// ABOUTME: MAAS signs requests with the token secret alone, so no request hashing is needed.

use crate::types::ApiKey;
use chrono::Utc;
use uuid::Uuid;

/// Build an `Authorization` header value with a fresh nonce and timestamp.
pub fn authorization_header(key: &ApiKey) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    authorization_header_with(key, &nonce, Utc::now().timestamp())
}

fn authorization_header_with(key: &ApiKey, nonce: &str, timestamp: i64) -> String {
    // PLAINTEXT signature is "<consumer_secret>&<token_secret>"; MAAS consumers have no secret
    let signature = format!("&{}", key.token_secret());
    format!(
        "OAuth oauth_version=\"1.0\", oauth_signature_method=\"PLAINTEXT\", \
         oauth_consumer_key=\"{}\", oauth_token=\"{}\", oauth_signature=\"{}\", \
         oauth_nonce=\"{}\", oauth_timestamp=\"{}\"",
        urlencoding::encode(key.consumer_key()),
        urlencoding::encode(key.token_key()),
        urlencoding::encode(&signature),
        nonce,
        timestamp
    )
}
