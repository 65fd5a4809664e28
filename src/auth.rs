// Credentials: password hashing and signed bearer tokens.
//
// Password hash format:
//   pbkdf2-sha256${iterations}${salt_hex}${hash_hex}
//
// Access token format: {subject_b64}.{issued_at_secs}.{nonce_hex}.{hmac_hex}
//
// The subject is the user's email, base64url-encoded (no padding) so it never
// contains the '.' separator. The HMAC covers everything before the last '.'
// and is keyed with GROUND_SECRET_KEY. Tokens are stateless: nothing is
// stored server-side, and a token is valid until its age passes the TTL.

use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const HASH_SCHEME: &str = "pbkdf2-sha256";

/// PBKDF2 rounds for new hashes. Stored per hash, so it can be raised later.
pub const PBKDF2_ITERATIONS: u32 = 600_000;

const SALT_LEN: usize = 16;

const HASH_LEN: usize = 32;

/// Checked in place of a real hash when the account doesn't exist, so a
/// miss costs as much as a wrong password.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{HASH_SCHEME}${PBKDF2_ITERATIONS}${}${}",
        "00".repeat(SALT_LEN),
        "00".repeat(HASH_LEN)
    )
});

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    let hash = derive_key(password.as_bytes(), &salt, PBKDF2_ITERATIONS)?;
    Ok(format!(
        "{HASH_SCHEME}${PBKDF2_ITERATIONS}${}${}",
        hex::encode(salt),
        hex::encode(hash)
    ))
}

/// Check a password against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((iterations, salt, expected)) = parse_hash(stored) else {
        return false;
    };
    match derive_key(password.as_bytes(), &salt, iterations) {
        Ok(actual) => constant_time_eq(&actual, &expected),
        Err(_) => false,
    }
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_async(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("Password hashing task failed")?
}

/// [`verify_password`] on the blocking pool. With no stored hash (unknown
/// account) the dummy hash is checked instead and the answer is always false.
pub async fn verify_password_async(password: String, stored: Option<String>) -> bool {
    let found = stored.is_some();
    let stored = stored.unwrap_or_else(|| (*DUMMY_HASH).clone());
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .unwrap_or(false);
    found && verified
}

/// Split `scheme$iterations$salt$hash` into its decoded parts.
fn parse_hash(stored: &str) -> Option<(u32, Vec<u8>, Vec<u8>)> {
    let parts: Vec<&str> = stored.split('$').collect();
    let [scheme, iterations, salt_hex, hash_hex] = parts.as_slice() else {
        return None;
    };
    if *scheme != HASH_SCHEME {
        return None;
    }
    let iterations = iterations.parse::<u32>().ok()?;
    let salt = hex::decode(salt_hex).ok()?;
    let hash = hex::decode(hash_hex).ok()?;
    Some((iterations, salt, hash))
}

fn derive_key(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; HASH_LEN]> {
    if iterations == 0 {
        anyhow::bail!("PBKDF2 iteration count must be positive");
    }
    let mut out = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);
    Ok(out)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Issue an access token for `subject` (the user's email).
pub fn create_token(secret: &str, subject: &str) -> Result<String> {
    create_token_at(secret, subject, unix_now())
}

/// Issue a token with an explicit issue time.
pub fn create_token_at(secret: &str, subject: &str, issued_at: u64) -> Result<String> {
    let mut nonce_bytes = [0u8; 8];
    rand::rng().fill_bytes(&mut nonce_bytes);

    let payload = format!(
        "{}.{issued_at}.{}",
        URL_SAFE_NO_PAD.encode(subject.as_bytes()),
        hex::encode(nonce_bytes)
    );
    let sig = hmac_sign(secret, &payload)?;
    Ok(format!("{payload}.{sig}"))
}

/// Verify a token and return its subject if the signature is valid and the
/// token is younger than `ttl_secs`.
pub fn verify_token(secret: &str, token: &str, ttl_secs: u64) -> Option<String> {
    verify_token_at(secret, token, ttl_secs, unix_now())
}

pub fn verify_token_at(secret: &str, token: &str, ttl_secs: u64, now: u64) -> Option<String> {
    let (payload, provided_sig) = token.rsplit_once('.')?;
    let expected_sig = hmac_sign(secret, payload).ok()?;
    if !constant_time_eq(provided_sig.as_bytes(), expected_sig.as_bytes()) {
        return None;
    }

    let mut parts = payload.split('.');
    let (Some(subject_b64), Some(issued), Some(_nonce), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let issued_at = issued.parse::<u64>().ok()?;
    // Tokens from the future are rejected too
    if issued_at > now || now - issued_at >= ttl_secs {
        return None;
    }

    let subject = URL_SAFE_NO_PAD.decode(subject_b64).ok()?;
    String::from_utf8(subject).ok()
}

fn hmac_sign(secret: &str, payload: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).context("Invalid HMAC key")?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time comparison to prevent timing attacks.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
