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
use hmacapi::{ApiRequest, ACCESS_SIGNATURE};
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

#[test_case("GET___prices__buy", Method::GET, &["prices", "buy"] ; "get")]
#[test_case("POST___buttons", Method::POST, &["buttons"] ; "post")]
#[test_case("put___users__1234__settings", Method::PUT, &["users", "1234", "settings"] ; "lowercase put")]
#[test_case("Delete___orders__42", Method::DELETE, &["orders", "42"] ; "mixed case delete")]
fn test_compound_matches_explicit(token: &str, method: Method, path: &[&str]) -> Result<()> {
    let time = chrono::Utc.timestamp_opt(1700000000, 123_456).unwrap();
    let client = client_at(time);
    let payload = json!({"qty": 1});

    let compound = ApiRequest::from_compound(token)?.with_json(payload.clone());
    let explicit = ApiRequest::new(method, path.iter().copied())?.with_json(payload);
    assert_eq!(compound, explicit);

    let a = client.build_request(&compound)?;
    let b = client.build_request(&explicit)?;
    assert_eq!(a.method(), b.method());
    assert_eq!(a.uri(), b.uri());
    assert_eq!(a.body(), b.body());
    assert_eq!(a.headers()[ACCESS_SIGNATURE], b.headers()[ACCESS_SIGNATURE]);
    Ok(())
}

#[tokio::test]
async fn test_call_sends_compound_request() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, "");
    let client = client_with(http.clone());

    client
        .call("POST___buttons", Some(json!({"name": "test", "price": "5.00"})))
        .await?;
    client.call("GET___prices__buy", None).await?;

    let sent = http.requests();
    assert_eq!(sent[0].method(), Method::POST);
    assert_eq!(sent[0].uri(), "https://api.example.com/v1/buttons");
    assert_eq!(sent[0].body().as_ref(), br#"{"name":"test","price":"5.00"}"#);
    assert_eq!(sent[1].method(), Method::GET);
    assert_eq!(sent[1].uri(), "https://api.example.com/v1/prices/buy");
    assert!(sent[1].body().is_empty());
    Ok(())
}

#[test_case("PATCH___prices" ; "unsupported verb")]
#[test_case("GET" ; "no separator")]
#[test_case("GET___" ; "no path")]
#[test_case("___prices" ; "no verb")]
#[tokio::test]
async fn test_call_rejects_malformed_token(token: &str) {
    let http = RecordingHttpSend::new(StatusCode::OK, "");
    let client = client_with(http.clone());

    let err = client
        .call(token, None)
        .await
        .expect_err("malformed token must fail");
    assert_eq!(err.kind(), hmacapi_core::ErrorKind::RequestInvalid);
    assert!(http.requests().is_empty());
}

#[test]
fn test_to_compound_round_trip() -> Result<()> {
    let req = ApiRequest::put(["users", "1234", "settings"])?;
    let token = req.to_compound()?;

    assert_eq!(token, "PUT___users__1234__settings");
    assert_eq!(ApiRequest::from_compound(&token)?, req);
    Ok(())
}
