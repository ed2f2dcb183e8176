// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::*;
use chrono::TimeZone;
use hmac::{Hmac, Mac};
use hmacapi::{ApiRequest, ACCESS_NONCE, ACCESS_SIGNATURE};
use http::header::CONTENT_TYPE;
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use sha2::Sha256;
use std::collections::HashSet;
use std::thread;
use test_case::test_case;

/// Recompute the signature the way the server does.
fn server_signature(req: &http::Request<Bytes>) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(ACCESS_SECRET.as_bytes()).unwrap();
    mac.update(req.headers()[ACCESS_NONCE].as_bytes());
    mac.update(req.uri().to_string().as_bytes());
    mac.update(req.body());
    hex::encode(mac.finalize().into_bytes())
}

fn nonce_of(req: &http::Request<Bytes>) -> u64 {
    req.headers()[ACCESS_NONCE]
        .to_str()
        .unwrap()
        .parse()
        .expect("nonce must be decimal")
}

#[test_case(Method::GET, &["prices", "buy"] ; "get two segments")]
#[test_case(Method::POST, &["buttons"] ; "post one segment")]
#[test_case(Method::PUT, &["users", "1234", "settings"] ; "put three segments")]
#[test_case(Method::DELETE, &["orders", "ab-12_x.y~z"] ; "delete unreserved characters")]
#[test_case(Method::GET, &["accounts/primary", "balance"] ; "get slash inside segment")]
#[test_case(Method::GET, &["prices", "spot_rate?currency=USD"] ; "get query in last segment")]
#[test_case(Method::PUT, &["files", "a%20b"] ; "put pre-encoded segment")]
fn test_url_is_base_url_and_joined_path(method: Method, path: &[&str]) -> Result<()> {
    let client = client_with(RecordingHttpSend::new(StatusCode::OK, ""));
    let req = client.build_request(&ApiRequest::new(method.clone(), path.iter().copied())?)?;

    let url = format!("{BASE_URL}/{}", path.join("/"));
    assert_eq!(req.method(), &method);
    assert_eq!(req.uri().to_string(), url);
    assert_eq!(
        req.headers()[ACCESS_SIGNATURE].to_str()?,
        hmacapi::signature(
            ACCESS_SECRET,
            req.headers()[ACCESS_NONCE].to_str()?,
            &url,
            b""
        )
    );
    Ok(())
}

#[test]
fn test_headers_are_complete() -> Result<()> {
    let client = client_with(RecordingHttpSend::new(StatusCode::OK, ""));
    let req = client.build_request(&ApiRequest::get(["prices", "buy"])?)?;

    assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(req.headers()[hmacapi::ACCESS_KEY], ACCESS_KEY);
    assert_eq!(req.headers()[ACCESS_NONCE].len(), 16);

    let sig = req.headers()[ACCESS_SIGNATURE].to_str()?;
    assert_eq!(sig.len(), 64);
    assert!(sig.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')), "{sig}");
    Ok(())
}

#[test]
fn test_signature_matches_transmitted_bytes() -> Result<()> {
    let client = client_with(RecordingHttpSend::new(StatusCode::OK, ""));

    for req in [
        ApiRequest::get(["prices", "buy"])?,
        ApiRequest::post(["orders"])?.with_payload(&json!({"qty": 2, "currency": "USD"}))?,
    ] {
        let signed = client.build_request(&req)?;
        assert_eq!(
            signed.headers()[ACCESS_SIGNATURE].to_str()?,
            server_signature(&signed)
        );
    }
    Ok(())
}

#[test]
fn test_consecutive_nonces_increase() -> Result<()> {
    let client = client_with(RecordingHttpSend::new(StatusCode::OK, ""));
    let req = ApiRequest::get(["prices", "buy"])?;

    let first = client.build_request(&req)?;
    let second = client.build_request(&req)?;

    assert!(nonce_of(&second) > nonce_of(&first));
    assert!(
        second.headers()[ACCESS_NONCE].as_bytes() > first.headers()[ACCESS_NONCE].as_bytes()
    );
    assert_ne!(
        first.headers()[ACCESS_SIGNATURE],
        second.headers()[ACCESS_SIGNATURE]
    );
    Ok(())
}

#[test]
fn test_pinned_time_is_reproducible() -> Result<()> {
    let time = chrono::Utc.timestamp_opt(1660582212, 42_000).unwrap();
    let req = ApiRequest::post(["orders"])?.with_payload(&json!({"qty": 2}))?;

    let a = client_at(time).build_request(&req)?;
    let b = client_at(time).build_request(&req)?;

    assert_eq!(a.headers()[ACCESS_NONCE], "1660582212000042");
    assert_eq!(a.headers(), b.headers());
    assert_eq!(a.body(), b.body());
    assert_eq!(
        a.headers()[ACCESS_SIGNATURE].to_str()?,
        hmacapi::signature(
            ACCESS_SECRET,
            "1660582212000042",
            "https://api.example.com/v1/orders",
            br#"{"qty":2}"#
        )
    );
    Ok(())
}

#[test]
fn test_concurrent_builds() -> Result<()> {
    let client = client_with(RecordingHttpSend::new(StatusCode::OK, ""));
    let req = ApiRequest::get(["prices", "spot_rate"])?;

    let handles = (0..4)
        .map(|_| {
            let client = client.clone();
            let req = req.clone();
            thread::spawn(move || {
                (0..250)
                    .map(|_| client.build_request(&req))
                    .collect::<Result<Vec<_>>>()
            })
        })
        .collect::<Vec<_>>();

    let mut nonces = HashSet::new();
    for handle in handles {
        for signed in handle.join().expect("thread must not panic")? {
            assert_eq!(
                signed.headers()[ACCESS_SIGNATURE].to_str()?,
                server_signature(&signed)
            );
            assert!(nonces.insert(nonce_of(&signed)));
        }
    }
    assert_eq!(nonces.len(), 1000);
    Ok(())
}
