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

use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Uri};
use hmacapi_core::{Context, Error, ProvideCredential, Result, Signer};
use log::{debug, warn};
use serde_json::Value;

use crate::request::ApiRequest;
use crate::sign_request::RequestSigner;
use crate::{Config, Credential, DefaultCredentialProvider};

/// Client sends signed requests to the API and hands back raw response bodies.
///
/// The credential is resolved once at construction; a client that was built
/// successfully always has a usable base url, key and secret. Cloning is
/// cheap and clones share the same credential and transport.
///
/// ## Example
///
/// ```no_run
/// use hmacapi::Client;
/// use hmacapi_core::{Context, OsEnv};
/// use hmacapi_file_read_tokio::TokioFileRead;
/// use hmacapi_http_send_reqwest::ReqwestHttpSend;
/// use serde_json::json;
///
/// # async fn example() -> hmacapi_core::Result<()> {
/// let ctx = Context::new()
///     .with_file_read(TokioFileRead)
///     .with_http_send(ReqwestHttpSend::default())
///     .with_env(OsEnv);
/// let client = Client::new(ctx).await?;
///
/// let body = client.get(&[json!("prices"), json!("buy")]).await?;
/// let body = client
///     .post(&[json!("buttons"), json!({"name": "test", "price": "5.00"})])
///     .await?;
/// let body = client.call("GET___prices__buy", None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client loading its credential with the [`DefaultCredentialProvider`].
    pub async fn new(ctx: Context) -> Result<Self> {
        Self::with_provider(ctx, DefaultCredentialProvider::new()).await
    }

    /// Create a client loading its credential with the default chain driven by `config`.
    pub async fn with_config(ctx: Context, config: Config) -> Result<Self> {
        Self::with_provider(ctx, DefaultCredentialProvider::with_config(Arc::new(config))).await
    }

    /// Create a client loading its credential from `provider`.
    ///
    /// Returns a `ConfigInvalid` error if the provider finds no credential
    /// or an invalid one.
    pub async fn with_provider(
        ctx: Context,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let signer = Signer::load(ctx, provider, RequestSigner::new()).await?;
        Ok(Self { signer })
    }

    /// Create a client from an already loaded credential.
    pub fn with_credential(ctx: Context, credential: Credential) -> Result<Self> {
        let signer = Signer::new(ctx, credential, RequestSigner::new())?;
        Ok(Self { signer })
    }

    /// Create a client around an existing signer.
    pub fn with_signer(signer: Signer<Credential>) -> Self {
        Self { signer }
    }

    /// The credential this client signs with.
    pub fn credential(&self) -> &Credential {
        self.signer.credential()
    }

    /// Build the signed HTTP request for `req` without sending it.
    ///
    /// The payload is serialized exactly once; the returned request carries
    /// the same bytes that were signed.
    ///
    /// Returns a `RequestInvalid` error if the joined url is not a valid uri,
    /// or if sending it would rewrite it: `.`/`..` path segments, or any
    /// form that does not render back to the same string.
    pub fn build_request(&self, req: &ApiRequest) -> Result<http::Request<Bytes>> {
        let url = req.url(&self.credential().base_url);
        let uri = parse_url(&url)?;
        let body = req.body()?;

        let (mut parts, ()) = http::Request::builder()
            .method(req.method().clone())
            .uri(uri)
            .body(())?
            .into_parts();
        self.signer.sign(&mut parts, &body)?;

        Ok(http::Request::from_parts(parts, body))
    }

    /// Send an already built request and return the response untouched.
    ///
    /// No status interpretation and no retry happen here.
    pub async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.signer.context().http_send(req).await
    }

    /// Build, sign and send `req`, returning the raw response body.
    ///
    /// Returns a `Transport` error if the transport fails or the response
    /// status is not 2xx; the error message carries the status and body.
    pub async fn execute(&self, req: &ApiRequest) -> Result<Bytes> {
        let signed = self.build_request(req)?;
        let method = signed.method().clone();
        let uri = signed.uri().clone();
        debug!("sending {method} {uri}");

        let resp = self.send(signed).await?;
        let status = resp.status();
        if !status.is_success() {
            warn!("{method} {uri} returned {status}");
            return Err(Error::transport(format!(
                "{method} {uri} returned {status}: {}",
                String::from_utf8_lossy(resp.body())
            )));
        }

        Ok(resp.into_body())
    }

    /// `GET` the resource named by `args`.
    ///
    /// `args` are path segments, optionally followed by a payload object;
    /// see [`resolve_args`](crate::resolve_args).
    pub async fn get(&self, args: &[Value]) -> Result<Bytes> {
        self.dispatch(Method::GET, args).await
    }

    /// `POST` to the resource named by `args`.
    pub async fn post(&self, args: &[Value]) -> Result<Bytes> {
        self.dispatch(Method::POST, args).await
    }

    /// `PUT` to the resource named by `args`.
    pub async fn put(&self, args: &[Value]) -> Result<Bytes> {
        self.dispatch(Method::PUT, args).await
    }

    /// `DELETE` the resource named by `args`.
    pub async fn delete(&self, args: &[Value]) -> Result<Bytes> {
        self.dispatch(Method::DELETE, args).await
    }

    /// Call a compound token such as `GET___prices__buy`, with an optional payload.
    pub async fn call(&self, token: &str, payload: Option<Value>) -> Result<Bytes> {
        let mut req = ApiRequest::from_compound(token)?;
        if let Some(payload) = payload {
            req = req.with_json(payload);
        }

        self.execute(&req).await
    }

    async fn dispatch(&self, method: Method, args: &[Value]) -> Result<Bytes> {
        let req = ApiRequest::from_args(method, args)?;
        self.execute(&req).await
    }
}

/// Parse `url`, rejecting anything the signer and the transport would see
/// differently.
fn parse_url(url: &str) -> Result<Uri> {
    let uri: Uri = url.parse()?;

    if uri
        .path()
        .split('/')
        .any(|seg| seg == "." || seg == "..")
    {
        return Err(Error::request_invalid(format!(
            "url {url} has dot segments that would be normalized away"
        )));
    }
    if uri.to_string() != url {
        return Err(Error::request_invalid(format!(
            "url {url} is not in canonical form, it renders as {uri}"
        )));
    }

    Ok(uri)
}
