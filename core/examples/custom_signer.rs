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

//! Plug a custom signing scheme into `Signer`.

use hmacapi_core::hash::hex_hmac_sha256;
use hmacapi_core::time::{format_unix_micros, now};
use hmacapi_core::{Context, Result, SignRequest, Signer, SigningCredential};

#[derive(Clone, Debug)]
struct MyCredential {
    api_key: String,
    api_secret: String,
}

impl SigningCredential for MyCredential {
    fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

/// Signs `timestamp + path + body` and puts the result in `x-api-signature`.
#[derive(Debug)]
struct MyRequestSigner;

impl SignRequest for MyRequestSigner {
    type Credential = MyCredential;

    fn sign_request(
        &self,
        req: &mut http::request::Parts,
        body: &[u8],
        cred: &MyCredential,
    ) -> Result<()> {
        let timestamp = format_unix_micros(now());
        let mut message = format!("{timestamp}{}", req.uri.path()).into_bytes();
        message.extend_from_slice(body);

        let signature = hex_hmac_sha256(cred.api_secret.as_bytes(), &message);

        req.headers.insert("x-api-key", cred.api_key.parse()?);
        req.headers.insert("x-api-timestamp", timestamp.parse()?);
        req.headers.insert("x-api-signature", signature.parse()?);
        Ok(())
    }
}

fn main() -> Result<()> {
    let cred = MyCredential {
        api_key: "demo-api-key".to_string(),
        api_secret: "demo-api-secret".to_string(),
    };
    let signer = Signer::new(Context::new(), cred, MyRequestSigner)?;

    let body = br#"{"name":"alice"}"#.to_vec();
    let (mut parts, _) = http::Request::post("https://api.example.com/v1/users")
        .body(())?
        .into_parts();
    signer.sign(&mut parts, &body)?;

    println!("Headers: {:?}", parts.headers);
    Ok(())
}
