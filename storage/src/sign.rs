//! AWS Signature Version 4, the two shapes S3 needs here: an Authorization
//! header for PUT and a query-string presigned GET.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";
const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

#[derive(Debug, Clone)]
pub struct Credentials<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub region: &'a str,
}

/// Header values for a signed PUT request.
pub struct PutSignature {
    pub amz_date: String,
    pub payload_hash: String,
    pub authorization: String,
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts keys of any length"));
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// SigV4 percent-encoding: RFC 3986 unreserved characters pass through,
/// `/` survives only in paths.
pub fn uri_encode(input: &str, keep_slash: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            b'/' if keep_slash => out.push('/'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn amz_date(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%SZ").to_string()
}

fn datestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d").to_string()
}

fn credential_scope(date: &str, region: &str) -> String {
    format!("{date}/{region}/{SERVICE}/aws4_request")
}

fn signing_key(secret: &str, date: &str, region: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, SERVICE.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

fn string_to_sign(stamp: &str, scope: &str, canonical_request: &str) -> String {
    format!(
        "{ALGORITHM}\n{stamp}\n{scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    )
}

/// Sign a `PUT {path}` carrying `payload`. `path` must already be
/// percent-encoded and start with `/`.
pub fn sign_put(
    creds: &Credentials<'_>,
    host: &str,
    path: &str,
    payload: &[u8],
    now: DateTime<Utc>,
) -> PutSignature {
    let stamp = amz_date(now);
    let date = datestamp(now);
    let scope = credential_scope(&date, creds.region);
    let payload_hash = sha256_hex(payload);

    let signed_headers = "host;x-amz-content-sha256;x-amz-date";
    let canonical_request = format!(
        "PUT\n{path}\n\nhost:{host}\nx-amz-content-sha256:{payload_hash}\nx-amz-date:{stamp}\n\n{signed_headers}\n{payload_hash}"
    );
    let key = signing_key(creds.secret_access_key, &date, creds.region);
    let signature = hex::encode(hmac_sha256(
        &key,
        string_to_sign(&stamp, &scope, &canonical_request).as_bytes(),
    ));

    let authorization = format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
        creds.access_key_id
    );
    PutSignature {
        amz_date: stamp,
        payload_hash,
        authorization,
    }
}

/// Build a presigned `GET {path}` URL valid for `ttl_secs`. Pure
/// computation, no request is made.
pub fn presign_get(
    creds: &Credentials<'_>,
    host: &str,
    path: &str,
    ttl_secs: u64,
    now: DateTime<Utc>,
) -> String {
    let stamp = amz_date(now);
    let date = datestamp(now);
    let scope = credential_scope(&date, creds.region);
    let credential = format!("{}/{scope}", creds.access_key_id);

    // Already in canonical (sorted) order.
    let params = [
        ("X-Amz-Algorithm", ALGORITHM.to_string()),
        ("X-Amz-Credential", credential),
        ("X-Amz-Date", stamp.clone()),
        ("X-Amz-Expires", ttl_secs.to_string()),
        ("X-Amz-SignedHeaders", "host".to_string()),
    ];
    let canonical_query = params
        .iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k, false), uri_encode(v, false)))
        .collect::<Vec<_>>()
        .join("&");

    let canonical_request =
        format!("GET\n{path}\n{canonical_query}\nhost:{host}\n\nhost\n{UNSIGNED_PAYLOAD}");
    let key = signing_key(creds.secret_access_key, &date, creds.region);
    let signature = hex::encode(hmac_sha256(
        &key,
        string_to_sign(&stamp, &scope, &canonical_request).as_bytes(),
    ));

    format!("https://{host}{path}?{canonical_query}&X-Amz-Signature={signature}")
}
