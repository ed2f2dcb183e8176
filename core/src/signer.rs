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

use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use log::debug;
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// The credential is resolved once when the signer is built and never
/// changes afterwards, so a signer can be shared across tasks and threads
/// without any locking.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    ctx: Context,
    credential: Arc<C>,
    builder: Arc<dyn SignRequest<Credential = C>>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer with an already loaded credential.
    ///
    /// Returns a `ConfigInvalid` error if the credential is not valid.
    pub fn new(
        ctx: Context,
        credential: C,
        builder: impl SignRequest<Credential = C>,
    ) -> Result<Self> {
        if !credential.is_valid() {
            return Err(Error::config_invalid(format!(
                "credential is not valid: {credential:?}"
            )));
        }

        Ok(Self {
            ctx,
            credential: Arc::new(credential),
            builder: Arc::new(builder),
        })
    }

    /// Create a new signer by loading the credential from `provider`.
    ///
    /// Returns a `ConfigInvalid` error if the provider has no credential.
    pub async fn load(
        ctx: Context,
        provider: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Result<Self> {
        let credential = provider.provide_credential(&ctx).await?.ok_or_else(|| {
            Error::config_invalid(format!("no credential found by {provider:?}"))
        })?;
        debug!("signer loaded credential: {credential:?}");

        Self::new(ctx, credential, builder)
    }

    /// The context this signer was built with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// The credential this signer signs with.
    pub fn credential(&self) -> &C {
        &self.credential
    }

    /// Signing request.
    ///
    /// `body` must be the exact bytes that will be sent with `req`.
    pub fn sign(&self, req: &mut http::request::Parts, body: &[u8]) -> Result<()> {
        self.builder.sign_request(req, body, &self.credential)
    }
}
