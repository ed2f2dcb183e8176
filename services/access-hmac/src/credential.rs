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

use std::fmt::{Debug, Formatter};

use http::{HeaderValue, Uri};
use hmacapi_core::utils::Redact;
use hmacapi_core::{Error, Result, SigningCredential};

/// Credential is the immutable set of client credentials: where the API
/// lives and the key pair used to sign requests to it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Base url every resource path is appended to, e.g. `https://api.example.com/v1`.
    pub base_url: String,
    /// Access key sent verbatim in the `ACCESS_KEY` header.
    pub access_key: String,
    /// Shared secret keying the request signature. Never transmitted.
    pub access_secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            access_key: access_key.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Build a credential out of optional fields read from `source`.
    ///
    /// - Returns `Ok(None)` if no field is set at all.
    /// - Returns a `ConfigInvalid` error naming the missing fields if only some are set.
    /// - Returns a `ConfigInvalid` error if the fields are set but invalid.
    pub fn from_fields(
        base_url: Option<String>,
        access_key: Option<String>,
        access_secret: Option<String>,
        source: &str,
    ) -> Result<Option<Self>> {
        match (base_url, access_key, access_secret) {
            (None, None, None) => Ok(None),
            (Some(base_url), Some(access_key), Some(access_secret)) => {
                let cred = Self::new(base_url, access_key, access_secret);
                cred.validate()
                    .map_err(|e| Error::config_invalid(format!("{source}: {}", e.message())))?;
                Ok(Some(cred))
            }
            (base_url, access_key, access_secret) => {
                let missing = [
                    ("base url", base_url.is_none()),
                    ("access key", access_key.is_none()),
                    ("access secret", access_secret.is_none()),
                ]
                .iter()
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", ");

                Err(Error::config_invalid(format!("{source}: missing {missing}")))
            }
        }
    }

    /// Check that every field is usable.
    ///
    /// The access key must be sendable as a header value. The base url must
    /// be an absolute `http` or `https` url without query, written the way
    /// it goes on the wire: lowercase scheme and host, no default port.
    pub fn validate(&self) -> Result<()> {
        if self.access_key.is_empty() {
            return Err(Error::config_invalid("access key is empty"));
        }
        if let Err(e) = HeaderValue::from_str(&self.access_key) {
            return Err(
                Error::config_invalid("access key is not a valid header value").with_source(e),
            );
        }
        if self.access_secret.is_empty() {
            return Err(Error::config_invalid("access secret is empty"));
        }
        if self.base_url.is_empty() {
            return Err(Error::config_invalid("base url is empty"));
        }

        let uri: Uri = self.base_url.parse().map_err(|e| {
            Error::config_invalid(format!("base url {} is invalid", self.base_url)).with_source(e)
        })?;
        let default_port = if self.base_url.starts_with("https://") {
            443
        } else if self.base_url.starts_with("http://") {
            80
        } else {
            return Err(Error::config_invalid(format!(
                "base url {} must start with http:// or https://",
                self.base_url
            )));
        };
        let Some(authority) = uri.authority() else {
            return Err(Error::config_invalid(format!(
                "base url {} has no host",
                self.base_url
            )));
        };
        if authority.host().bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(Error::config_invalid(format!(
                "base url {} must have a lowercase host",
                self.base_url
            )));
        }
        if uri.port_u16() == Some(default_port) {
            return Err(Error::config_invalid(format!(
                "base url {} must not spell out the default port",
                self.base_url
            )));
        }
        if uri.query().is_some() {
            return Err(Error::config_invalid(format!(
                "base url {} must not carry a query",
                self.base_url
            )));
        }

        Ok(())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("base_url", &self.base_url)
            .field("access_key", &Redact::from(&self.access_key))
            .field("access_secret", &Redact::from(&self.access_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
