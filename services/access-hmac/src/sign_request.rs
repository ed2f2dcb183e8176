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

//! Access key request signing.
use http::header::CONTENT_TYPE;
use http::HeaderValue;
use hmacapi_core::hash::hex_hmac_sha256_parts;
use hmacapi_core::time::DateTime;
use hmacapi_core::{Result, SignRequest};
use log::debug;

use crate::constants::*;
use crate::credential::Credential;
use crate::nonce::Nonce;

/// RequestSigner that implements access key authentication.
///
/// Every signed request carries:
///
/// - `ACCESS_NONCE`: a fresh [`Nonce`]
/// - `ACCESS_KEY`: the configured access key
/// - `ACCESS_SIGNATURE`: [`signature`] over the nonce, the full url and the body
/// - `Content-Type: application/json`, even without body
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing: every request signed by this
    /// signer will carry the same nonce.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn nonce(&self) -> Nonce {
        self.time.map(Nonce::at).unwrap_or_else(Nonce::next)
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        req: &mut http::request::Parts,
        body: &[u8],
        cred: &Self::Credential,
    ) -> Result<()> {
        let nonce = self.nonce().to_string();
        // Sign the url exactly as it will go on the wire.
        let url = req.uri.to_string();
        debug!(
            "string to sign: nonce {nonce}, url {url}, body {} bytes",
            body.len()
        );

        let signature = signature(&cred.access_secret, &nonce, &url, body);

        req.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        req.headers.insert(ACCESS_NONCE, nonce.parse()?);
        req.headers.insert(ACCESS_KEY, {
            let mut value: HeaderValue = cred.access_key.parse()?;
            value.set_sensitive(true);

            value
        });
        req.headers.insert(ACCESS_SIGNATURE, {
            let mut value: HeaderValue = signature.parse()?;
            value.set_sensitive(true);

            value
        });

        Ok(())
    }
}

/// Compute the request signature.
///
/// ## Format
///
/// ```text
/// hex(HMAC-SHA256(secret, nonce + url + body))
/// ```
///
/// `url` is the full url including the base url, and `body` is empty for
/// requests without payload. The hex digest is lowercase.
pub fn signature(secret: &str, nonce: &str, url: &str, body: &[u8]) -> String {
    hex_hmac_sha256_parts(
        secret.as_bytes(),
        &[nonce.as_bytes(), url.as_bytes(), body],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hmacapi_core::{Context, Signer};
    use pretty_assertions::assert_eq;

    fn fixed_time() -> DateTime {
        chrono::Utc.timestamp_opt(1660582212, 42_000).unwrap()
    }

    #[test]
    fn test_signature_vector() {
        // echo -n '1660582212000042https://api.example.com/v1/prices/buy' \
        //   | openssl dgst -sha256 -hmac secret
        let expected = hex::encode({
            use hmac::Mac;
            let mut mac = hmac::Hmac::<sha2::Sha256>::new_from_slice(b"secret").unwrap();
            mac.update(b"1660582212000042https://api.example.com/v1/prices/buy");
            mac.finalize().into_bytes()
        });

        let actual = signature(
            "secret",
            "1660582212000042",
            "https://api.example.com/v1/prices/buy",
            b"",
        );
        assert_eq!(actual, expected);
        assert_eq!(actual.len(), 64);
        assert_eq!(actual, actual.to_lowercase());
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = signature("secret", "1", "https://a.example/x", br#"{"qty":2}"#);
        let b = signature("secret", "1", "https://a.example/x", br#"{"qty":2}"#);
        assert_eq!(a, b);

        let c = signature("secret", "2", "https://a.example/x", br#"{"qty":2}"#);
        assert_ne!(a, c);
    }

    #[test]
    fn test_sign_request_headers() -> Result<()> {
        let cred = Credential::new("https://api.example.com/v1", "access_key", "secret");
        let signer = Signer::new(
            Context::new(),
            cred,
            RequestSigner::new().with_time(fixed_time()),
        )?;

        let (mut parts, _) = http::Request::get("https://api.example.com/v1/prices/buy")
            .body(())?
            .into_parts();
        signer.sign(&mut parts, b"")?;

        assert_eq!(parts.headers[CONTENT_TYPE], "application/json");
        assert_eq!(parts.headers[ACCESS_NONCE], "1660582212000042");
        assert_eq!(parts.headers[ACCESS_KEY], "access_key");
        assert_eq!(
            parts.headers[ACCESS_SIGNATURE].to_str()?,
            signature(
                "secret",
                "1660582212000042",
                "https://api.example.com/v1/prices/buy",
                b""
            )
        );
        assert!(parts.headers[ACCESS_SIGNATURE].is_sensitive());
        Ok(())
    }

    #[test]
    fn test_sign_request_covers_body() -> Result<()> {
        let cred = Credential::new("https://api.example.com/v1", "access_key", "secret");
        let signer = Signer::new(
            Context::new(),
            cred,
            RequestSigner::new().with_time(fixed_time()),
        )?;

        let (mut empty, _) = http::Request::post("https://api.example.com/v1/orders")
            .body(())?
            .into_parts();
        signer.sign(&mut empty, b"")?;

        let (mut with_body, _) = http::Request::post("https://api.example.com/v1/orders")
            .body(())?
            .into_parts();
        signer.sign(&mut with_body, br#"{"qty":2}"#)?;

        assert_eq!(empty.headers[ACCESS_NONCE], with_body.headers[ACCESS_NONCE]);
        assert_ne!(
            empty.headers[ACCESS_SIGNATURE],
            with_body.headers[ACCESS_SIGNATURE]
        );
        Ok(())
    }
}
