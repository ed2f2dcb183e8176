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

//! Core components for signing access-key API requests.
//!
//! This crate provides the foundational types and traits shared by the
//! hmacapi client and its transport/context crates.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending, and environment access
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`) and request signing (`SignRequest`)
//! - **Signer**: Holds a credential resolved once up front and applies a `SignRequest` to outgoing requests
//!
//! ## Example
//!
//! ```
//! use hmacapi_core::{Context, Result, SignRequest, Signer, SigningCredential};
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     fn sign_request(
//!         &self,
//!         req: &mut http::request::Parts,
//!         _body: &[u8],
//!         cred: &MyCredential,
//!     ) -> Result<()> {
//!         req.headers.insert("x-key", cred.key.parse()?);
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let cred = MyCredential { key: "my-key".to_string() };
//! let signer = Signer::new(Context::new(), cred, MySigner)?;
//!
//! let (mut parts, body) = http::Request::get("https://api.example.com/prices")
//!     .body(Vec::<u8>::new())?
//!     .into_parts();
//! signer.sign(&mut parts, &body)?;
//! assert_eq!(parts.headers["x-key"], "my-key");
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC and hashing helpers
//! - [`time`]: Clock access and timestamp formatting
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod context;
pub use context::{Context, Env, FileRead, HttpSend, NoopEnv, NoopFileRead, NoopHttpSend};
pub use context::{OsEnv, StaticEnv};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod chain;
pub use chain::ProvideCredentialChain;
mod signer;
pub use signer::Signer;
