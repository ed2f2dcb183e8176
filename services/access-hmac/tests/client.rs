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
use hmacapi::{ApiRequest, ACCESS_NONCE};
use hmacapi_core::ErrorKind;
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

#[tokio::test]
async fn test_get_with_trailing_payload() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, r#"{"amount":"100.00"}"#);
    let client = client_with(http.clone());

    let body = client
        .get(&[json!("prices"), json!("buy"), json!({"currency": "USD"})])
        .await?;
    assert_eq!(body, Bytes::from_static(br#"{"amount":"100.00"}"#));

    let sent = http.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method(), Method::GET);
    assert_eq!(sent[0].uri(), "https://api.example.com/v1/prices/buy");

    let payload: Value = serde_json::from_slice(sent[0].body()).expect("body must be json");
    assert_eq!(payload, json!({"currency": "USD"}));
    Ok(())
}

#[tokio::test]
async fn test_get_without_payload_sends_empty_body() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, "{}");
    let client = client_with(http.clone());

    client.get(&[json!("accounts")]).await?;

    let sent = http.requests();
    assert_eq!(sent[0].uri(), "https://api.example.com/v1/accounts");
    assert!(sent[0].body().is_empty());
    Ok(())
}

#[test_case(Method::POST ; "post")]
#[test_case(Method::PUT ; "put")]
#[test_case(Method::DELETE ; "delete")]
#[tokio::test]
async fn test_verbs(method: Method) -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, "");
    let client = client_with(http.clone());

    let args = [json!("users"), json!(1234), json!({"name": "test"})];
    if method == Method::POST {
        client.post(&args).await?;
    } else if method == Method::PUT {
        client.put(&args).await?;
    } else {
        client.delete(&args).await?;
    }

    let sent = http.requests();
    assert_eq!(sent[0].method(), method);
    assert_eq!(sent[0].uri(), "https://api.example.com/v1/users/1234");
    assert_eq!(sent[0].body().as_ref(), br#"{"name":"test"}"#);
    Ok(())
}

#[tokio::test]
async fn test_empty_args_never_reach_transport() {
    let http = RecordingHttpSend::new(StatusCode::OK, "");
    let client = client_with(http.clone());

    let err = client.get(&[]).await.expect_err("empty path must fail");
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);

    let err = client
        .post(&[json!({"name": "test"})])
        .await
        .expect_err("payload without path must fail");
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);

    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_non_success_status() {
    let http = RecordingHttpSend::new(StatusCode::UNAUTHORIZED, "invalid signature");
    let client = client_with(http);

    let err = client
        .get(&[json!("prices"), json!("buy")])
        .await
        .expect_err("401 must fail");
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("401"), "{err}");
    assert!(err.to_string().contains("invalid signature"), "{err}");
}

#[tokio::test]
async fn test_send_returns_raw_response() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::NOT_FOUND, "no such resource");
    let client = client_with(http);

    let req = client.build_request(&ApiRequest::delete(["orders", "42"])?)?;
    let resp = client.send(req).await?;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.body().as_ref(), b"no such resource");
    Ok(())
}

#[tokio::test]
async fn test_immediate_requests_have_distinct_nonces() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, "");
    let client = client_with(http.clone());

    client.get(&[json!("prices"), json!("buy")]).await?;
    client.get(&[json!("prices"), json!("buy")]).await?;

    let nonces = http
        .requests()
        .iter()
        .map(|req| req.headers()[ACCESS_NONCE].to_str().map(str::to_string))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    assert_eq!(nonces.len(), 2);
    assert!(nonces[1] > nonces[0], "{nonces:?}");
    Ok(())
}

#[tokio::test]
async fn test_concurrent_calls() -> Result<()> {
    let http = RecordingHttpSend::new(StatusCode::OK, "");
    let client = client_with(http.clone());

    let tasks = (0..16)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.get(&[json!("orders"), json!(i)]).await })
        })
        .collect::<Vec<_>>();
    for task in tasks {
        task.await.expect("task must not panic")?;
    }

    let mut nonces = http
        .requests()
        .iter()
        .map(|req| req.headers()[ACCESS_NONCE].clone())
        .collect::<Vec<_>>();
    nonces.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
    nonces.dedup();
    assert_eq!(nonces.len(), 16);
    Ok(())
}
