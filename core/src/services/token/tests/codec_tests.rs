//! Unit tests for the HS512 codec

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use serde_json::Value;

use crate::domain::entities::claims::Claims;
use crate::services::policy::SigningKey;
use crate::services::token::codec::{self, Rejection};

fn key(fill: &str) -> SigningKey {
    SigningKey::from_secret("test_secret", &fill.repeat(64)).unwrap()
}

#[test]
fn test_sign_and_verify() {
    let key = key("A");
    let claims = Claims::new("{\"id\":1}".to_string(), 60);

    let token = codec::sign(&key, &claims).unwrap();
    let verified = codec::verify(&key, &token).unwrap();
    assert_eq!(verified, claims);
}

#[test]
fn test_header_declares_hs512() {
    let token = codec::sign(&key("A"), &Claims::new("1".to_string(), 60)).unwrap();
    let header = token.split('.').next().unwrap();

    let decoded = URL_SAFE_NO_PAD.decode(header).unwrap();
    let header: Value = serde_json::from_slice(&decoded).unwrap();
    assert_eq!(header["alg"], "HS512");
}

#[test]
fn test_wrong_key_is_signature_rejection() {
    let token = codec::sign(&key("A"), &Claims::new("1".to_string(), 60)).unwrap();
    assert_eq!(codec::verify(&key("B"), &token), Err(Rejection::Signature));
}

#[test]
fn test_expired_claims_are_expired_rejection() {
    let token = codec::sign(&key("A"), &Claims::new("1".to_string(), -5)).unwrap();
    assert_eq!(codec::verify(&key("A"), &token), Err(Rejection::Expired));
}

#[test]
fn test_claims_expiring_this_second_are_rejected() {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "1".to_string(),
        iat: now - 1,
        exp: now,
    };
    let token = codec::sign(&key("A"), &claims).unwrap();
    assert_eq!(codec::verify(&key("A"), &token), Err(Rejection::Expired));
}

#[test]
fn test_malformed_token_is_malformed_rejection() {
    assert!(matches!(
        codec::verify(&key("A"), "garbage"),
        Err(Rejection::Malformed(_))
    ));
}
