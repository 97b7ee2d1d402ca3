//! Integration tests for the token lifecycle through the public API

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use st_core::{AccessToken, PolicyResolver, RefreshToken, Token, TokenPolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Principal {
    id: u64,
    name: String,
}

fn admin() -> Principal {
    Principal {
        id: 1,
        name: "Admin".to_string(),
    }
}

fn properties(entries: &[(&str, String)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_admin_token_scenario() {
    let policy = TokenPolicy::builder()
        .token_secret("A".repeat(64))
        .token_timeout(300)
        .build()
        .unwrap();

    let token = Token::create(&policy, admin()).unwrap();
    assert!(!token.value().is_empty());
    assert_eq!(token.subject(), Some(&admin()));
    assert!(!token.is_invalid());

    let parsed = Token::<Principal>::parse(&policy, token.value());
    assert_eq!(parsed.subject(), Some(&admin()));
    assert!(!parsed.is_invalid());
}

#[test]
fn test_login_refresh_logout_flow() {
    let props = properties(&[
        ("stateless.token.secret", "T".repeat(64)),
        ("stateless.token.timeout", "300".to_string()),
        ("stateless.accessToken.secret", "X".repeat(64)),
        ("stateless.refreshToken.secret", "R".repeat(64)),
    ]);
    let policy = PolicyResolver::new().resolve(&props).unwrap();

    // login
    let access = AccessToken::create(&policy, admin()).unwrap();
    let refresh = RefreshToken::create(&policy, admin()).unwrap();

    // refresh: the refresh token renews the access token
    let presented = RefreshToken::<Principal>::parse(&policy, refresh.value());
    assert!(presented.is_valid());
    let renewed = AccessToken::create(&policy, presented.into_subject().unwrap()).unwrap();
    assert!(AccessToken::<Principal>::parse(&policy, renewed.value()).is_valid());

    // a refresh token is not accepted as an access token
    assert!(AccessToken::<Principal>::parse(&policy, refresh.value()).is_invalid());
    assert!(RefreshToken::<Principal>::parse(&policy, access.value()).is_invalid());

    // logout overwrites the client credential with a poisoned token
    let logout = AccessToken::create_with_timeout(&policy, admin(), -1).unwrap();
    assert!(logout.is_invalid());
    assert!(AccessToken::<Principal>::parse(&policy, logout.value()).is_invalid());
}

#[test]
fn test_generic_subject_as_dynamic_map() {
    let policy = TokenPolicy::builder()
        .token_secret("M".repeat(64))
        .token_timeout(60)
        .build()
        .unwrap();

    let mut subject: HashMap<String, Value> = HashMap::new();
    subject.insert("id".to_string(), Value::from(7));
    subject.insert("roles".to_string(), Value::from(vec!["user", "admin"]));

    let token = Token::create(&policy, subject.clone()).unwrap();
    let parsed = Token::<HashMap<String, Value>>::parse(&policy, token.value());
    assert_eq!(parsed.into_subject(), Some(subject));
}

#[test]
fn test_concurrent_create_and_parse() {
    let policy = Arc::new(
        TokenPolicy::builder()
            .token_secret("C".repeat(64))
            .token_timeout(300)
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..8u64)
        .map(|id| {
            let policy = Arc::clone(&policy);
            thread::spawn(move || {
                for n in 0..25u64 {
                    let subject = Principal {
                        id: id * 100 + n,
                        name: format!("user-{}", n),
                    };
                    let token = AccessToken::create(&policy, subject.clone()).unwrap();
                    let parsed = AccessToken::<Principal>::parse(&policy, token.value());
                    assert_eq!(parsed.into_subject(), Some(subject));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
