//! Reads claims out of a bearer token without verifying its signature.
//!
//! The server rejects forged or expired tokens on every request; these helpers only decide
//! what the UI shows before that happens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::api::Role;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("token has no payload segment")]
    MissingPayload,
    #[error("token payload is not valid base64")]
    InvalidBase64,
    #[error("token payload is not a JSON object: {0}")]
    InvalidJson(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenClaims {
    pub role: Option<Role>,
    pub exp: Option<i64>,
    pub sub: Option<String>,
}

fn normalize_segment(segment: &str) -> String {
    segment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimError> {
    let mut parts = token.trim().split('.');
    parts.next().ok_or(ClaimError::MissingPayload)?;
    let payload = parts
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or(ClaimError::MissingPayload)?;
    let decoded = URL_SAFE_NO_PAD
        .decode(normalize_segment(payload))
        .map_err(|_| ClaimError::InvalidBase64)?;
    let value: Value =
        serde_json::from_slice(&decoded).map_err(|e| ClaimError::InvalidJson(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| ClaimError::InvalidJson("payload is not an object".into()))?;

    Ok(TokenClaims {
        role: object
            .get("role")
            .and_then(|v| v.as_str())
            .and_then(Role::parse),
        exp: object.get("exp").and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().map(|secs| secs.floor() as i64))
        }),
        sub: object
            .get("sub")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
    })
}

pub fn read_role(token: &str) -> Option<Role> {
    decode_claims(token).ok()?.role
}

pub fn read_subject(token: &str) -> Option<String> {
    decode_claims(token).ok()?.sub
}

pub fn read_expiry(token: &str) -> Option<DateTime<Utc>> {
    let exp = decode_claims(token).ok()?.exp?;
    Utc.timestamp_opt(exp, 0).single()
}

/// Fail-closed: anything that cannot be decoded counts as expired.
pub fn is_token_expired(token: &str, now: DateTime<Utc>) -> bool {
    match read_expiry(token) {
        Some(expiry) => now.timestamp_millis() > expiry.timestamp_millis(),
        None => true,
    }
}

#[cfg(test)]
pub(crate) fn encode_test_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}
