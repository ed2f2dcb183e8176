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

//! Client for HTTP APIs authenticated with an access key and HMAC-SHA256
//! request signatures.
//!
//! Every request carries three headers:
//!
//! - `ACCESS_NONCE`: seconds since the epoch followed by 6-digit microseconds,
//!   strictly increasing within the process
//! - `ACCESS_KEY`: the configured access key
//! - `ACCESS_SIGNATURE`: lowercase hex `HMAC-SHA256(secret, nonce + url + body)`
//!
//! Resources are addressed by path segments appended to the configured base
//! url. They can be given as a list, as positional arguments with a trailing
//! payload, or as a compound token such as `GET___prices__buy`.
//!
//! ## Example
//!
//! ```no_run
//! use hmacapi::{ApiRequest, Client, Config};
//! use hmacapi_core::{Context, OsEnv};
//! use hmacapi_file_read_tokio::TokioFileRead;
//! use hmacapi_http_send_reqwest::ReqwestHttpSend;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> hmacapi_core::Result<()> {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!     let client = Client::with_config(ctx, Config::new().with_profile("sandbox")).await?;
//!
//!     let req = ApiRequest::get(["prices", "buy"])?.with_payload(&json!({"qty": 2}))?;
//!     let body = client.execute(&req).await?;
//!     println!("{}", String::from_utf8_lossy(&body));
//!     Ok(())
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::{ACCESS_KEY, ACCESS_NONCE, ACCESS_SIGNATURE};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod nonce;
pub use nonce::Nonce;

mod request;
pub use request::{parse_method, resolve_args, ApiRequest};

mod sign_request;
pub use sign_request::{signature, RequestSigner};

mod client;
pub use client::Client;

mod provide_credential;
pub use provide_credential::*;
